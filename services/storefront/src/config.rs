/// Storefront configuration loaded from environment variables.
#[derive(Debug)]
pub struct StorefrontConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing the session cookie. Env var: `SESSION_SECRET`.
    pub session_secret: String,
    /// TCP port for the HTTP server (default 5000). Env var: `STOREFRONT_PORT`.
    pub storefront_port: u16,
    /// Mark the session cookie `Secure` (default false). Env var: `COOKIE_SECURE`.
    pub cookie_secure: bool,
    /// Upper bound of the connection pool (default 10). Env var: `DATABASE_MAX_CONNECTIONS`.
    pub database_max_connections: u32,
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            storefront_port: std::env::var("STOREFRONT_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
