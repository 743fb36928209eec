use std::sync::Arc;

use tracing::info;

use bookstore_core::db::connect;
use bookstore_core::tracing::init_tracing;
use bookstore_session::SessionSettings;
use bookstore_storefront::config::StorefrontConfig;
use bookstore_storefront::router::build_router;
use bookstore_storefront::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = StorefrontConfig::from_env();

    let db = connect(&config.database_url, config.database_max_connections)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db: Arc::new(db),
        session: SessionSettings::new(config.session_secret, config.cookie_secure),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.storefront_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("storefront listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
