use axum::{
    extract::{Query, State},
    response::Response,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bookstore_domain::id::BookId;
use bookstore_session::{CurrentUser, Session};

use crate::domain::types::{Book, ResultRow};
use crate::error::StorefrontError;
use crate::handlers::redirect;
use crate::state::AppState;
use crate::usecase::catalog::SearchBooksUseCase;

/// Shared by customers and admins; the template branches on the role.
pub const BOOK_MANAGEMENT_TEMPLATE: &str = "book_management.html";

#[derive(Serialize)]
pub struct BookView {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            book_id: book.book_id,
            title: book.title,
            author: book.author,
            category: book.category,
            price: book.price,
            quantity: book.quantity,
        }
    }
}

/// `books` holds the `search_books` rows with their own columns.
#[derive(Serialize)]
pub struct BookManagementPage {
    pub books: Vec<ResultRow>,
    pub search_query: String,
}

// ── GET /books ───────────────────────────────────────────────────────────────

pub async fn books(_user: CurrentUser, session: Session) -> Response {
    redirect(session, "/search")
}

// ── GET /search ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

pub async fn search(
    _user: CurrentUser,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchParams>,
) -> Result<Response, StorefrontError> {
    let usecase = SearchBooksUseCase {
        repo: state.book_repo(),
    };
    let books = usecase.execute(&params.query).await?;
    Ok(session.render(
        BOOK_MANAGEMENT_TEMPLATE,
        BookManagementPage {
            books,
            search_query: params.query,
        },
    ))
}
