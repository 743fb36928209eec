use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::{Deserialize, Serialize};

use bookstore_core::view::Page;

use crate::domain::types::Book;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::book::{
    AddBookUseCase, BookForm, DeleteBookUseCase, EditBookUseCase, GetBookUseCase,
    ListBooksUseCase,
};

#[derive(Deserialize)]
pub struct BookFormBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub year: String,
}

impl From<BookFormBody> for BookForm {
    fn from(body: BookFormBody) -> Self {
        Self {
            title: body.title,
            author: body.author,
            year: body.year,
        }
    }
}

#[derive(Serialize)]
pub struct IndexPage {
    pub books: Vec<Book>,
}

#[derive(Serialize)]
pub struct EditPage {
    pub book: Book,
}

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn index(State(state): State<AppState>) -> Result<Page<IndexPage>, CatalogError> {
    let usecase = ListBooksUseCase {
        repo: state.book_repo(),
    };
    let books = usecase.execute().await?;
    Ok(Page::new("index.html", IndexPage { books }))
}

// ── GET|POST /add ────────────────────────────────────────────────────────────

pub async fn add_page() -> Page<()> {
    Page::new("add_book.html", ())
}

pub async fn add_book(
    State(state): State<AppState>,
    Form(body): Form<BookFormBody>,
) -> Result<Redirect, CatalogError> {
    let usecase = AddBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(body.into()).await?;
    Ok(Redirect::to("/"))
}

// ── GET|POST /edit/{id} ──────────────────────────────────────────────────────

pub async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Page<EditPage>, CatalogError> {
    let usecase = GetBookUseCase {
        repo: state.book_repo(),
    };
    let book = usecase.execute(id).await?;
    Ok(Page::new("edit_book.html", EditPage { book }))
}

pub async fn edit_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(body): Form<BookFormBody>,
) -> Result<Redirect, CatalogError> {
    let usecase = EditBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(id, body.into()).await?;
    Ok(Redirect::to("/"))
}

// ── GET /delete/{id} ─────────────────────────────────────────────────────────

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, CatalogError> {
    let usecase = DeleteBookUseCase {
        repo: state.book_repo(),
    };
    usecase.execute(id).await?;
    Ok(Redirect::to("/"))
}
