/// Catalog configuration loaded from environment variables.
#[derive(Debug)]
pub struct CatalogConfig {
    /// SQLite URL. Env var: `CATALOG_DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server. Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://books.db?mode=rwc";
pub const DEFAULT_PORT: u16 = 5001;

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("CATALOG_DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            catalog_port: std::env::var("CATALOG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
        }
    }
}
