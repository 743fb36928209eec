//! Page contexts handed to the template layer.
//!
//! A handler never produces markup. It names the template and the values the
//! template receives; the serialized [`Page`] is the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use bookstore_domain::flash::Flash;
use bookstore_domain::user::Identity;

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub template: &'static str,
    pub flashes: Vec<Flash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    pub data: T,
}

impl<T> Page<T> {
    pub fn new(template: &'static str, data: T) -> Self {
        Self {
            template,
            flashes: Vec::new(),
            user: None,
            data,
        }
    }

    pub fn with_flashes(mut self, flashes: Vec<Flash>) -> Self {
        self.flashes = flashes;
        self
    }

    pub fn with_user(mut self, user: Option<Identity>) -> Self {
        self.user = user;
        self
    }
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
