use bookstore_domain::id::BookId;

use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookDraft, ResultRow};
use crate::error::StorefrontError;

// ── SearchBooks ──────────────────────────────────────────────────────────────

pub struct SearchBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> SearchBooksUseCase<R> {
    /// Ranking and filtering belong to `search_books`; an empty query is
    /// passed through unchanged.
    pub async fn execute(&self, query: &str) -> Result<Vec<ResultRow>, StorefrontError> {
        self.repo.search(query).await
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, id: BookId) -> Result<Book, StorefrontError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(StorefrontError::BookNotFound)
    }
}

// ── Admin CRUD ───────────────────────────────────────────────────────────────

/// Raw admin form fields.
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub price: String,
    pub quantity: String,
}

impl BookForm {
    fn into_draft(self) -> Result<BookDraft, StorefrontError> {
        BookDraft::parse(
            self.title,
            self.author,
            self.category,
            &self.price,
            &self.quantity,
        )
        .ok_or(StorefrontError::InvalidBookInput)
    }
}

pub struct CreateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> CreateBookUseCase<R> {
    pub async fn execute(&self, form: BookForm) -> Result<BookId, StorefrontError> {
        let draft = form.into_draft()?;
        let id = self.repo.create(&draft).await?;
        tracing::info!(book_id = %id, title = %draft.title, "book added");
        Ok(id)
    }
}

pub struct UpdateBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> UpdateBookUseCase<R> {
    pub async fn execute(&self, id: BookId, form: BookForm) -> Result<(), StorefrontError> {
        let draft = form.into_draft()?;
        if !self.repo.update(id, &draft).await? {
            return Err(StorefrontError::BookNotFound);
        }
        tracing::info!(book_id = %id, "book updated");
        Ok(())
    }
}

pub struct DeleteBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeleteBookUseCase<R> {
    pub async fn execute(&self, id: BookId) -> Result<(), StorefrontError> {
        if !self.repo.delete(id).await? {
            return Err(StorefrontError::BookNotFound);
        }
        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }
}
