use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use bookstore_core::health::{healthz, readyz};
use bookstore_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    admin::{add_book, add_book_page, delete_book, manage_books, update_book, update_book_page},
    auth::{home, login, login_page, logout, register, register_page},
    cart::{add_to_cart, remove_cart_item, update_cart_item, view_cart},
    catalog::{books, search},
    checkout::checkout,
    profile::profile,
    reports::reports,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/", get(home))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/register", get(register_page).post(register))
        .route("/profile", get(profile))
        // Catalog
        .route("/books", get(books))
        .route("/search", get(search))
        // Cart
        .route("/cart", get(view_cart))
        .route("/cart/add/{book_id}", post(add_to_cart))
        .route("/cart/update/{cart_item_id}", post(update_cart_item))
        .route("/cart/remove/{cart_item_id}", post(remove_cart_item))
        .route("/checkout", post(checkout))
        // Admin
        .route("/admin/books", get(manage_books))
        .route("/admin/books/add", get(add_book_page).post(add_book))
        .route(
            "/admin/books/update/{book_id}",
            get(update_book_page).post(update_book),
        )
        .route("/admin/books/delete/{book_id}", post(delete_book))
        .route("/reports", get(reports))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
