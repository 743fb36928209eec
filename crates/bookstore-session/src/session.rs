//! The `Session` extractor.
//!
//! Read the session in a handler, mutate it, and return it as part of the
//! response: `(session, Redirect::to("/cart"))`. The cookie is rewritten only
//! when something changed.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, IntoResponseParts, Response, ResponseParts};
use axum_extra::extract::cookie::CookieJar;
use http::HeaderMap;
use http::request::Parts;
use serde::Serialize;

use bookstore_core::view::Page;
use bookstore_domain::flash::Flash;
use bookstore_domain::user::Identity;

use crate::cookie::{SESSION_COOKIE, clear_session_cookie, set_session_cookie};
use crate::token::{SessionClaims, decode_session, encode_session};

/// Signing secret and cookie flags, exposed from the app state via `FromRef`.
#[derive(Clone)]
pub struct SessionSettings {
    secret: Arc<str>,
    secure: bool,
}

impl SessionSettings {
    pub fn new(secret: impl Into<Arc<str>>, secure: bool) -> Self {
        Self {
            secret: secret.into(),
            secure,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSettings")
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    claims: SessionClaims,
    settings: SessionSettings,
    dirty: bool,
}

impl Session {
    /// Load the session from the request cookies. A missing cookie yields an
    /// empty session; a forged or unreadable one is discarded.
    pub fn from_headers(headers: &HeaderMap, settings: SessionSettings) -> Self {
        let jar = CookieJar::from_headers(headers);
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Self::empty(settings);
        };
        if cookie.value().is_empty() {
            return Self::empty(settings);
        }
        match decode_session(cookie.value(), settings.secret()) {
            Ok(claims) => Self {
                claims,
                settings,
                dirty: false,
            },
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session cookie");
                Self {
                    claims: SessionClaims::default(),
                    settings,
                    dirty: true,
                }
            }
        }
    }

    fn empty(settings: SessionSettings) -> Self {
        Self {
            claims: SessionClaims::default(),
            settings,
            dirty: false,
        }
    }

    pub fn user(&self) -> Option<&Identity> {
        self.claims.user.as_ref()
    }

    pub fn claims(&self) -> &SessionClaims {
        &self.claims
    }

    /// Store the identity. Pending flashes and `next_url` are kept.
    pub fn login(&mut self, user: Identity) {
        self.claims.user = Some(user);
        self.dirty = true;
    }

    /// Drop everything, identity and pending flashes alike.
    pub fn clear(&mut self) {
        self.claims = SessionClaims::default();
        self.dirty = true;
    }

    pub fn flash(&mut self, flash: Flash) {
        self.claims.flashes.push(flash);
        self.dirty = true;
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        if self.claims.flashes.is_empty() {
            return Vec::new();
        }
        self.dirty = true;
        std::mem::take(&mut self.claims.flashes)
    }

    pub fn set_next_url(&mut self, path: impl Into<String>) {
        self.claims.next_url = Some(path.into());
        self.dirty = true;
    }

    pub fn take_next_url(&mut self) -> Option<String> {
        let next = self.claims.next_url.take();
        if next.is_some() {
            self.dirty = true;
        }
        next
    }

    /// Render a page, consuming the pending flashes.
    pub fn render<T: Serialize>(mut self, template: &'static str, data: T) -> Response {
        let page = Page::new(template, data)
            .with_flashes(self.take_flashes())
            .with_user(self.claims.user.clone());
        (self, page).into_response()
    }
}

impl<S> FromRequestParts<S> for Session
where
    SessionSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = Session::from_headers(&parts.headers, SessionSettings::from_ref(state));
        async move { Ok(session) }
    }
}

impl IntoResponseParts for Session {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if !self.dirty {
            return Ok(res);
        }
        let secure = self.settings.secure;
        let jar = if self.claims.is_empty() {
            clear_session_cookie(CookieJar::new(), secure)
        } else {
            match encode_session(&self.claims, self.settings.secret()) {
                Ok(token) => set_session_cookie(CookieJar::new(), token, secure),
                Err(e) => {
                    tracing::error!(error = %e, "failed to write session cookie");
                    return Ok(res);
                }
            }
        };
        jar.into_response_parts(res)
    }
}
