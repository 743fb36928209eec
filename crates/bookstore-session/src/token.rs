//! Signed session payload.
//!
//! The session lives entirely in the cookie as an HS256 JWT. There is no
//! `exp` claim: a session ends on logout only.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use bookstore_domain::flash::Flash;
use bookstore_domain::user::Identity;

/// Everything the storefront keeps between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
    /// Path a guarded route was requested at before the login redirect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flashes: Vec<Flash>,
}

impl SessionClaims {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.next_url.is_none() && self.flashes.is_empty()
    }
}

/// Errors returned by [`decode_session`] and [`encode_session`].
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed session")]
    Malformed,
    #[error("failed to sign session")]
    Sign,
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    validation
}

pub fn encode_session(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| SessionError::Sign)
}

pub fn decode_session(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => SessionError::InvalidSignature,
        _ => SessionError::Malformed,
    })?;
    Ok(data.claims)
}
