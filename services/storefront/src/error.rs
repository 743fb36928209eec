use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Storefront error variants.
///
/// Handlers turn the expected ones into flash messages; the rest reach the
/// client through [`IntoResponse`].
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email already registered")]
    EmailTaken,
    #[error("user not found")]
    UserNotFound,
    #[error("book not found")]
    BookNotFound,
    #[error("cart item not found")]
    CartItemNotFound,
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("quantity must be at least 1")]
    QuantityBelowOne,
    #[error("invalid price or quantity")]
    InvalidBookInput,
    /// Message raised by a stored procedure (`RAISE EXCEPTION`).
    #[error("{0}")]
    Rejected(String),
    #[error("database unavailable")]
    DatabaseUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StorefrontError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::CartItemNotFound => "CART_ITEM_NOT_FOUND",
            Self::InvalidQuantity => "INVALID_QUANTITY",
            Self::QuantityBelowOne => "QUANTITY_BELOW_ONE",
            Self::InvalidBookInput => "INVALID_BOOK_INPUT",
            Self::Rejected(_) => "REJECTED",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::UserNotFound | Self::BookNotFound | Self::CartItemNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidQuantity | Self::QuantityBelowOne | Self::InvalidBookInput => {
                StatusCode::BAD_REQUEST
            }
            Self::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
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
