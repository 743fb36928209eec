use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use bookstore_core::health::{healthz, readyz};
use bookstore_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::book::{add_book, add_page, delete_book, edit_book, edit_page, index};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Books
        .route("/", get(index))
        .route("/add", get(add_page).post(add_book))
        .route("/edit/{id}", get(edit_page).post(edit_book))
        .route("/delete/{id}", get(delete_book))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
