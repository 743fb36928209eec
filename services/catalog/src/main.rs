use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::info;

use bookstore_catalog::config::CatalogConfig;
use bookstore_catalog::router::build_router;
use bookstore_catalog::state::AppState;
use bookstore_catalog_migration::Migrator;
use bookstore_core::db::connect;
use bookstore_core::tracing::init_tracing;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CatalogConfig::from_env();

    // SQLite allows a single writer.
    let db = connect(&config.database_url, 1)
        .await
        .expect("failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("failed to create books table");

    let router = build_router(AppState { db: Arc::new(db) });
    let http_addr = format!("0.0.0.0:{}", config.catalog_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("catalog listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
