pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod profile;
pub mod reports;

use axum::response::{IntoResponse, Redirect, Response};

use bookstore_session::Session;

/// Redirect, writing any session change made by the handler.
pub(crate) fn redirect(session: Session, to: &str) -> Response {
    (session, Redirect::to(to)).into_response()
}
