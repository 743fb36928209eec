use std::sync::Arc;

use anyhow::Context as _;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, DeleteMany, EntityTrait, FromQueryResult, JoinType,
    JsonValue, QueryFilter, QuerySelect, RelationTrait, RuntimeErr, Statement, TransactionTrait,
    UpdateMany,
    sea_query::{Expr, Query, SimpleExpr},
};

use bookstore_core::db::is_unavailable;
use bookstore_domain::id::{BookId, CartItemId, OrderId, UserId};
use bookstore_domain::user::UserRole;
use bookstore_storefront_schema::{books, cart, cart_items, order_items, users};

use crate::domain::repository::{
    BookRepository, CartRepository, OrderRepository, UserRepository,
};
use crate::domain::types::{
    Book, BookDraft, CartLine, OrderLine, OrderSummary, Registration, ResultRow, User,
};
use crate::error::StorefrontError;

/// Name of the unique constraint on `users.email`.
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub const CALL_REGISTER_USER: &str = "CALL register_user($1, $2, $3, $4)";
pub const CALL_ADD_TO_CART: &str = "CALL add_to_cart($1, $2, $3)";
pub const CALL_PLACE_ORDER: &str = "CALL place_order($1)";
pub const SELECT_SEARCH_BOOKS: &str = "SELECT * FROM search_books($1)";
pub const SELECT_ORDER_HISTORY: &str = "SELECT * FROM view_order_history($1)";

pub const SELECT_CART_LINES: &str = r#"
    SELECT ci.cart_item_id, b.book_id, b.title, b.author, b.price, ci.quantity,
           (b.price * ci.quantity) AS subtotal, b.quantity AS stock
    FROM cart_items ci
    JOIN books b ON ci.book_id = b.book_id
    JOIN cart c ON ci.cart_id = c.cart_id
    WHERE c.user_id = $1
    ORDER BY b.title
"#;

pub const SELECT_ITEM_STOCK: &str = r#"
    SELECT b.quantity AS stock
    FROM books b
    JOIN cart_items ci ON b.book_id = ci.book_id
    JOIN cart c ON ci.cart_id = c.cart_id
    WHERE ci.cart_item_id = $1 AND c.user_id = $2
"#;

/// Restrict a `cart_items` query to items in the cart owned by `user_id`.
fn in_cart_of(user_id: UserId) -> SimpleExpr {
    cart_items::Column::CartId.in_subquery(
        Query::select()
            .column(cart::Column::CartId)
            .from(cart::Entity)
            .and_where(cart::Column::UserId.eq(user_id.0))
            .to_owned(),
    )
}

pub fn update_cart_item(
    user_id: UserId,
    item_id: CartItemId,
    quantity: i32,
) -> UpdateMany<cart_items::Entity> {
    cart_items::Entity::update_many()
        .col_expr(cart_items::Column::Quantity, Expr::value(quantity))
        .filter(cart_items::Column::CartItemId.eq(item_id.0))
        .filter(in_cart_of(user_id))
}

pub fn delete_cart_item(user_id: UserId, item_id: CartItemId) -> DeleteMany<cart_items::Entity> {
    cart_items::Entity::delete_many()
        .filter(cart_items::Column::CartItemId.eq(item_id.0))
        .filter(in_cart_of(user_id))
}

// ── Error mapping ────────────────────────────────────────────────────────────

fn db_error(err: DbErr, context: &'static str) -> StorefrontError {
    if is_unavailable(&err) {
        return StorefrontError::DatabaseUnavailable;
    }
    StorefrontError::Internal(anyhow::Error::new(err).context(context))
}

/// Text of an exception raised by a procedure (SQLSTATE class `P0`).
/// Driver errors and constraint violations return `None`.
pub fn raised_message(err: &DbErr) -> Option<String> {
    let runtime = match err {
        DbErr::Exec(e) | DbErr::Query(e) => e,
        _ => return None,
    };
    let RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err)) = runtime else {
        return None;
    };
    let code = db_err.code()?;
    code.starts_with("P0").then(|| db_err.message().to_owned())
}

pub fn is_duplicate_email(err: &DbErr) -> bool {
    err.to_string().contains(EMAIL_UNIQUE_CONSTRAINT)
}

fn into_columns(row: JsonValue, source: &'static str) -> Result<ResultRow, StorefrontError> {
    match row {
        JsonValue::Object(columns) => Ok(columns),
        other => Err(anyhow::anyhow!("{source} yielded a non-row value: {other}").into()),
    }
}

/// Run one `CALL` in a transaction: commit on success, roll back on failure.
async fn call_procedure(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<sea_orm::Value>,
) -> Result<(), DbErr> {
    let txn: DatabaseTransaction = db.begin().await?;
    match txn
        .execute(Statement::from_sql_and_values(DbBackend::Postgres, sql, values))
        .await
    {
        Ok(_) => txn.commit().await,
        Err(err) => {
            if let Err(rollback) = txn.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(err)
        }
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository for DbUserRepository {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StorefrontError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Password.eq(password))
            .one(&*self.db)
            .await
            .map_err(|e| db_error(e, "find user by credentials"))?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&*self.db)
            .await
            .map_err(|e| db_error(e, "find user by id"))?;
        model.map(user_from_model).transpose()
    }

    async fn register(&self, registration: &Registration) -> Result<(), StorefrontError> {
        let values = vec![
            registration.name.clone().into(),
            registration.email.clone().into(),
            registration.password.clone().into(),
            registration.address.clone().into(),
        ];
        call_procedure(&*self.db, CALL_REGISTER_USER, values)
            .await
            .map_err(|e| {
                if is_duplicate_email(&e) {
                    StorefrontError::EmailTaken
                } else {
                    db_error(e, "call register_user")
                }
            })
    }
}

fn user_from_model(model: users::Model) -> Result<User, StorefrontError> {
    let role = model
        .role
        .parse::<UserRole>()
        .context("parse user role")?;
    Ok(User {
        user_id: UserId(model.user_id),
        name: model.name,
        email: model.email,
        address: model.address,
        role,
    })
}

// ── Book repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbBookRepository {
    pub db: Arc<DatabaseConnection>,
}

impl BookRepository for DbBookRepository {
    async fn search(&self, query: &str) -> Result<Vec<ResultRow>, StorefrontError> {
        let rows = JsonValue::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_SEARCH_BOOKS,
            [query.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| db_error(e, "call search_books"))?;
        rows.into_iter()
            .map(|row| into_columns(row, "search_books"))
            .collect()
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StorefrontError> {
        let model = books::Entity::find_by_id(id.0)
            .one(&*self.db)
            .await
            .map_err(|e| db_error(e, "find book by id"))?;
        Ok(model.map(book_from_model))
    }

    async fn create(&self, draft: &BookDraft) -> Result<BookId, StorefrontError> {
        let model = books::ActiveModel {
            title: Set(draft.title.clone()),
            author: Set(draft.author.clone()),
            category: Set(draft.category.clone()),
            price: Set(draft.price),
            quantity: Set(draft.quantity),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(|e| db_error(e, "insert book"))?;
        Ok(BookId(model.book_id))
    }

    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<bool, StorefrontError> {
        let result = books::Entity::update_many()
            .col_expr(books::Column::Title, Expr::value(draft.title.clone()))
            .col_expr(books::Column::Author, Expr::value(draft.author.clone()))
            .col_expr(books::Column::Category, Expr::value(draft.category.clone()))
            .col_expr(books::Column::Price, Expr::value(draft.price))
            .col_expr(books::Column::Quantity, Expr::value(draft.quantity))
            .filter(books::Column::BookId.eq(id.0))
            .exec(&*self.db)
            .await
            .map_err(|e| db_error(e, "update book"))?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: BookId) -> Result<bool, StorefrontError> {
        let result = books::Entity::delete_by_id(id.0)
            .exec(&*self.db)
            .await
            .map_err(|e| db_error(e, "delete book"))?;
        Ok(result.rows_affected > 0)
    }
}

fn book_from_model(model: books::Model) -> Book {
    Book {
        book_id: BookId(model.book_id),
        title: model.title,
        author: model.author,
        category: model.category,
        price: model.price,
        quantity: model.quantity,
    }
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: Arc<DatabaseConnection>,
}

#[derive(Debug, FromQueryResult)]
struct CartLineRow {
    cart_item_id: i32,
    book_id: i32,
    title: String,
    author: String,
    price: Decimal,
    quantity: i32,
    subtotal: Decimal,
    stock: i32,
}

#[derive(Debug, FromQueryResult)]
struct StockRow {
    stock: i32,
}

impl CartRepository for DbCartRepository {
    async fn lines(&self, user_id: UserId) -> Result<Vec<CartLine>, StorefrontError> {
        let rows = CartLineRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_CART_LINES,
            [user_id.0.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| db_error(e, "list cart lines"))?;
        Ok(rows
            .into_iter()
            .map(|row| CartLine {
                cart_item_id: CartItemId(row.cart_item_id),
                book_id: BookId(row.book_id),
                title: row.title,
                author: row.author,
                price: row.price,
                quantity: row.quantity,
                subtotal: row.subtotal,
                stock: row.stock,
            })
            .collect())
    }

    async fn add(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: i32,
    ) -> Result<(), StorefrontError> {
        let values = vec![user_id.0.into(), book_id.0.into(), quantity.into()];
        call_procedure(&*self.db, CALL_ADD_TO_CART, values)
            .await
            .map_err(|e| match raised_message(&e) {
                Some(message) => StorefrontError::Rejected(message),
                None => db_error(e, "call add_to_cart"),
            })
    }

    async fn stock_for_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<Option<i32>, StorefrontError> {
        let row = StockRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_ITEM_STOCK,
            [item_id.0.into(), user_id.0.into()],
        ))
        .one(&*self.db)
        .await
        .map_err(|e| db_error(e, "find stock for cart item"))?;
        Ok(row.map(|r| r.stock))
    }

    async fn set_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<bool, StorefrontError> {
        let result = update_cart_item(user_id, item_id, quantity)
            .exec(&*self.db)
            .await
            .map_err(|e| db_error(e, "update cart item"))?;
        Ok(result.rows_affected > 0)
    }

    async fn remove(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<bool, StorefrontError> {
        let result = delete_cart_item(user_id, item_id)
            .exec(&*self.db)
            .await
            .map_err(|e| db_error(e, "delete cart item"))?;
        Ok(result.rows_affected > 0)
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: Arc<DatabaseConnection>,
}

#[derive(Debug, FromQueryResult)]
struct OrderLineRow {
    quantity: i32,
    price: Decimal,
    title: String,
}

impl OrderRepository for DbOrderRepository {
    async fn place_order(&self, user_id: UserId) -> Result<(), StorefrontError> {
        call_procedure(&*self.db, CALL_PLACE_ORDER, vec![user_id.0.into()])
            .await
            .map_err(|e| match raised_message(&e) {
                Some(message) => StorefrontError::Rejected(message),
                None => db_error(e, "call place_order"),
            })
    }

    async fn history(&self, user_id: UserId) -> Result<Vec<OrderSummary>, StorefrontError> {
        let rows = JsonValue::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            SELECT_ORDER_HISTORY,
            [user_id.0.into()],
        ))
        .all(&*self.db)
        .await
        .map_err(|e| db_error(e, "call view_order_history"))?;
        rows.into_iter().map(order_summary_from_row).collect()
    }

    async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, StorefrontError> {
        let rows = order_items::Entity::find()
            .select_only()
            .column(order_items::Column::Quantity)
            .column(order_items::Column::Price)
            .column(books::Column::Title)
            .join(JoinType::InnerJoin, order_items::Relation::Book.def())
            .filter(order_items::Column::OrderId.eq(order_id.0))
            .into_model::<OrderLineRow>()
            .all(&*self.db)
            .await
            .map_err(|e| db_error(e, "list order lines"))?;
        Ok(rows
            .into_iter()
            .map(|row| OrderLine {
                title: row.title,
                quantity: row.quantity,
                price: row.price,
            })
            .collect())
    }
}

fn order_summary_from_row(row: JsonValue) -> Result<OrderSummary, StorefrontError> {
    let columns = into_columns(row, "view_order_history")?;
    let order_id = columns
        .get("order_id")
        .and_then(JsonValue::as_i64)
        .and_then(|id| i32::try_from(id).ok())
        .context("read order_id from view_order_history")?;
    Ok(OrderSummary {
        order_id: OrderId(order_id),
        columns,
    })
}
