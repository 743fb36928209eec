#![allow(async_fn_in_trait)]

use crate::domain::types::{Book, BookInput};
use crate::error::CatalogError;

pub trait BookRepository: Send + Sync {
    /// Every row, in insertion order.
    async fn list(&self) -> Result<Vec<Book>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, CatalogError>;

    async fn create(&self, input: &BookInput) -> Result<Book, CatalogError>;

    /// Returns `true` if a row was updated.
    async fn update(&self, id: i32, input: &BookInput) -> Result<bool, CatalogError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, CatalogError>;
}
