use crate::domain::repository::BookRepository;
use crate::domain::types::{Book, BookInput};
use crate::error::CatalogError;

/// Raw form fields shared by add and edit.
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl BookForm {
    fn validate(self) -> Result<BookInput, CatalogError> {
        BookInput::parse(self.title, self.author, &self.year)
    }
}

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> ListBooksUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Book>, CatalogError> {
        self.repo.list().await
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> GetBookUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<Book, CatalogError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::BookNotFound)
    }
}

// ── AddBook ──────────────────────────────────────────────────────────────────

pub struct AddBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> AddBookUseCase<R> {
    pub async fn execute(&self, form: BookForm) -> Result<Book, CatalogError> {
        let input = form.validate()?;
        let book = self.repo.create(&input).await?;
        tracing::info!(id = book.id, title = %book.title, "book added");
        Ok(book)
    }
}

// ── EditBook ─────────────────────────────────────────────────────────────────

pub struct EditBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> EditBookUseCase<R> {
    pub async fn execute(&self, id: i32, form: BookForm) -> Result<(), CatalogError> {
        let input = form.validate()?;
        if !self.repo.update(id, &input).await? {
            return Err(CatalogError::BookNotFound);
        }
        Ok(())
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<R: BookRepository> {
    pub repo: R,
}

impl<R: BookRepository> DeleteBookUseCase<R> {
    /// Deleting an unknown id is not an error.
    pub async fn execute(&self, id: i32) -> Result<(), CatalogError> {
        if !self.repo.delete(id).await? {
            tracing::debug!(id, "delete matched no book");
        }
        Ok(())
    }
}
