use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

use bookstore_catalog::router::build_router;
use bookstore_catalog::state::AppState;
use bookstore_catalog_migration::Migrator;
use bookstore_core::db::connect;

/// A migrated SQLite file that is removed on drop.
pub struct TestDb {
    pub db: Arc<DatabaseConnection>,
    path: PathBuf,
}

impl TestDb {
    pub async fn new() -> Self {
        let path = std::env::temp_dir().join(format!("catalog-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite://{}?mode=rwc", path.display());
        let db = connect(&url, 1).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Self {
            db: Arc::new(db),
            path,
        }
    }

    pub fn app(&self) -> Router {
        build_router(AppState {
            db: self.db.clone(),
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
