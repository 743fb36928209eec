use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("book not found")]
    BookNotFound,
    #[error("{0} must not be empty")]
    MissingField(&'static str),
    #[error("year must be a whole number")]
    InvalidYear,
    #[error("database unavailable")]
    DatabaseUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidYear => "INVALID_YEAR",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BookNotFound => StatusCode::NOT_FOUND,
            Self::MissingField(_) | Self::InvalidYear => StatusCode::BAD_REQUEST,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => tracing::error!(error = ?e, kind = "INTERNAL", "internal error"),
            Self::DatabaseUnavailable => {
                tracing::error!(kind = "DATABASE_UNAVAILABLE", "database unavailable")
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
