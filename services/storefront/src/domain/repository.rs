#![allow(async_fn_in_trait)]

use bookstore_domain::id::{BookId, CartItemId, OrderId, UserId};

use crate::domain::types::{
    Book, BookDraft, CartLine, OrderLine, OrderSummary, Registration, ResultRow, User,
};
use crate::error::StorefrontError;

/// Repository for storefront accounts.
pub trait UserRepository: Send + Sync {
    /// Match an email/password pair against `users`.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StorefrontError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StorefrontError>;

    /// Call `register_user` in its own transaction. A duplicate email yields
    /// [`StorefrontError::EmailTaken`] after rollback.
    async fn register(&self, registration: &Registration) -> Result<(), StorefrontError>;
}

/// Repository for the book catalog.
pub trait BookRepository: Send + Sync {
    /// Rows of `search_books(query)` with whatever columns it yields, in the
    /// order it returns them.
    async fn search(&self, query: &str) -> Result<Vec<ResultRow>, StorefrontError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StorefrontError>;

    async fn create(&self, draft: &BookDraft) -> Result<BookId, StorefrontError>;

    /// Returns `true` if a row was updated.
    async fn update(&self, id: BookId, draft: &BookDraft) -> Result<bool, StorefrontError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: BookId) -> Result<bool, StorefrontError>;
}

/// Repository for the per-user cart. Item operations are scoped to the
/// user's own cart.
pub trait CartRepository: Send + Sync {
    async fn lines(&self, user_id: UserId) -> Result<Vec<CartLine>, StorefrontError>;

    /// Call `add_to_cart` in its own transaction.
    async fn add(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: i32,
    ) -> Result<(), StorefrontError>;

    /// Current stock of the book behind a cart item.
    async fn stock_for_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<Option<i32>, StorefrontError>;

    /// Returns `true` if the item was updated.
    async fn set_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<bool, StorefrontError>;

    /// Returns `true` if the item was deleted.
    async fn remove(&self, user_id: UserId, item_id: CartItemId)
    -> Result<bool, StorefrontError>;
}

/// Repository for orders.
pub trait OrderRepository: Send + Sync {
    /// Call `place_order` in its own transaction.
    async fn place_order(&self, user_id: UserId) -> Result<(), StorefrontError>;

    /// Rows of `view_order_history(user)`.
    async fn history(&self, user_id: UserId) -> Result<Vec<OrderSummary>, StorefrontError>;

    async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, StorefrontError>;
}
