use std::borrow::Cow;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use axum::Router;
use sea_orm::sqlx::error::{DatabaseError, ErrorKind};
use sea_orm::{
    DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, RuntimeErr, Transaction, Value,
};
use serde_json::Value as Json;

use bookstore_session::SessionSettings;
use bookstore_session::token::SessionClaims;
use bookstore_storefront::router::build_router;
use bookstore_storefront::state::AppState;
use bookstore_testing::session::TEST_SESSION_SECRET;

pub fn app(db: DatabaseConnection) -> Router {
    shared_app(Arc::new(db))
}

/// Router over a connection the test keeps a handle to, for reading the
/// transaction log afterwards.
pub fn shared_app(db: Arc<DatabaseConnection>) -> Router {
    build_router(AppState {
        db,
        session: SessionSettings::new(TEST_SESSION_SECRET, false),
    })
}

/// Statements recorded by a mock connection. Call once every router sharing
/// it has been consumed.
pub fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::into_inner(db)
        .expect("connection is still shared with a router")
        .into_transaction_log()
}

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

/// One raw result row keyed by column name.
pub fn row<const N: usize>(columns: [(&'static str, Value); N]) -> BTreeMap<&'static str, Value> {
    columns.into_iter().collect()
}

/// Messages of the flashes left in a written session.
pub fn flash_messages(claims: &SessionClaims) -> Vec<&str> {
    claims.flashes.iter().map(|f| f.message.as_str()).collect()
}

/// Messages of the flashes rendered into a page body.
pub fn page_flashes(body: &Json) -> Vec<String> {
    body["flashes"]
        .as_array()
        .map(|flashes| {
            flashes
                .iter()
                .filter_map(|f| f["message"].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

/// `RAISE EXCEPTION` from inside a procedure, as the Postgres driver reports it.
#[derive(Debug)]
struct RaisedException(String);

impl fmt::Display for RaisedException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for RaisedException {}

impl DatabaseError for RaisedException {
    fn message(&self) -> &str {
        &self.0
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("P0001"))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub fn raised_exception(message: &str) -> DbErr {
    DbErr::Exec(RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(
        Box::new(RaisedException(message.to_owned())),
    )))
}
