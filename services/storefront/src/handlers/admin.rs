use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use serde::{Deserialize, Serialize};

use bookstore_domain::flash::Flash;
use bookstore_domain::id::BookId;
use bookstore_session::{AdminUser, Session};

use crate::error::StorefrontError;
use crate::handlers::catalog::BookView;
use crate::handlers::redirect;
use crate::state::AppState;
use crate::usecase::catalog::{
    BookForm, CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, UpdateBookUseCase,
};

const MANAGE_BOOKS_PATH: &str = "/admin/books";
const ADD_BOOK_TEMPLATE: &str = "add_book.html";
const BOOK_NOT_FOUND_MESSAGE: &str = "Book not found.";
const INVALID_INPUT_MESSAGE: &str = "Invalid price or quantity.";

#[derive(Deserialize)]
pub struct BookFormBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub category: Option<String>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
}

impl From<BookFormBody> for BookForm {
    fn from(body: BookFormBody) -> Self {
        Self {
            title: body.title,
            author: body.author,
            category: body.category,
            price: body.price,
            quantity: body.quantity,
        }
    }
}

#[derive(Serialize)]
pub struct UpdateBookPage {
    pub book: BookView,
}

// ── GET /admin/books ─────────────────────────────────────────────────────────

pub async fn manage_books(_admin: AdminUser, session: Session) -> Response {
    redirect(session, "/search")
}

// ── GET|POST /admin/books/add ────────────────────────────────────────────────

pub async fn add_book_page(_admin: AdminUser, session: Session) -> Response {
    session.render(ADD_BOOK_TEMPLATE, ())
}

pub async fn add_book(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut session: Session,
    Form(body): Form<BookFormBody>,
) -> Result<Response, StorefrontError> {
    let usecase = CreateBookUseCase {
        repo: state.book_repo(),
    };
    match usecase.execute(body.into()).await {
        Ok(_) => {
            session.flash(Flash::success("Book added successfully!"));
            Ok(redirect(session, MANAGE_BOOKS_PATH))
        }
        Err(StorefrontError::InvalidBookInput) => {
            session.flash(Flash::danger(INVALID_INPUT_MESSAGE));
            Ok(session.render(ADD_BOOK_TEMPLATE, ()))
        }
        Err(e) => Err(e),
    }
}

// ── GET|POST /admin/books/update/{book_id} ───────────────────────────────────

pub async fn update_book_page(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut session: Session,
    Path(book_id): Path<BookId>,
) -> Result<Response, StorefrontError> {
    let usecase = GetBookUseCase {
        repo: state.book_repo(),
    };
    match usecase.execute(book_id).await {
        Ok(book) => Ok(session.render(
            "update_book.html",
            UpdateBookPage {
                book: BookView::from(book),
            },
        )),
        Err(StorefrontError::BookNotFound) => {
            session.flash(Flash::danger(BOOK_NOT_FOUND_MESSAGE));
            Ok(redirect(session, MANAGE_BOOKS_PATH))
        }
        Err(e) => Err(e),
    }
}

pub async fn update_book(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut session: Session,
    Path(book_id): Path<BookId>,
    Form(body): Form<BookFormBody>,
) -> Result<Response, StorefrontError> {
    let usecase = UpdateBookUseCase {
        repo: state.book_repo(),
    };
    match usecase.execute(book_id, body.into()).await {
        Ok(()) => {
            session.flash(Flash::success("Book updated successfully!"));
            Ok(redirect(session, MANAGE_BOOKS_PATH))
        }
        Err(StorefrontError::InvalidBookInput) => {
            session.flash(Flash::danger(INVALID_INPUT_MESSAGE));
            Ok(redirect(session, &format!("/admin/books/update/{book_id}")))
        }
        Err(StorefrontError::BookNotFound) => {
            session.flash(Flash::danger(BOOK_NOT_FOUND_MESSAGE));
            Ok(redirect(session, MANAGE_BOOKS_PATH))
        }
        Err(e) => Err(e),
    }
}

// ── POST /admin/books/delete/{book_id} ───────────────────────────────────────

pub async fn delete_book(
    _admin: AdminUser,
    State(state): State<AppState>,
    mut session: Session,
    Path(book_id): Path<BookId>,
) -> Result<Response, StorefrontError> {
    let usecase = DeleteBookUseCase {
        repo: state.book_repo(),
    };
    match usecase.execute(book_id).await {
        Ok(()) => session.flash(Flash::success("Book deleted successfully!")),
        Err(StorefrontError::BookNotFound) => session.flash(Flash::danger(BOOK_NOT_FOUND_MESSAGE)),
        Err(e) => return Err(e),
    }
    Ok(redirect(session, MANAGE_BOOKS_PATH))
}
