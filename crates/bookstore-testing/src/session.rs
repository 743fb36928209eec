//! Session cookies for tests.
//!
//! Guarded routes read the identity from the signed `bookstore_session`
//! cookie. `MockSession` signs one directly so no login round-trip is needed.

use axum::http::{HeaderValue, Response, header::SET_COOKIE};

use bookstore_domain::id::UserId;
use bookstore_domain::user::{Identity, UserRole};
use bookstore_session::cookie::SESSION_COOKIE;
use bookstore_session::token::{SessionClaims, decode_session, encode_session};

pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockSession {
    pub claims: SessionClaims,
}

impl MockSession {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self {
            claims: SessionClaims {
                user: Some(Identity {
                    user_id: UserId(user_id),
                    username: format!("user{user_id}"),
                    email: format!("user{user_id}@example.com"),
                    role,
                }),
                ..Default::default()
            },
        }
    }

    pub fn customer(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Customer)
    }

    pub fn admin(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    pub fn anonymous() -> Self {
        Self {
            claims: SessionClaims::default(),
        }
    }

    pub fn with_next_url(mut self, path: &str) -> Self {
        self.claims.next_url = Some(path.to_owned());
        self
    }

    /// `Cookie` header value as a browser would send it.
    pub fn cookie(&self) -> HeaderValue {
        let token = encode_session(&self.claims, TEST_SESSION_SECRET).unwrap();
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap()
    }
}

/// Decode the session written by a response, if it wrote one.
///
/// Returns `Some(SessionClaims::default())` when the cookie was cleared.
pub fn written_session<B>(resp: &Response<B>) -> Option<SessionClaims> {
    let prefix = format!("{SESSION_COOKIE}=");
    let header = resp
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))?;
    let token = header[prefix.len()..].split(';').next().unwrap_or_default();
    if token.is_empty() {
        return Some(SessionClaims::default());
    }
    Some(decode_session(token, TEST_SESSION_SECRET).unwrap())
}
