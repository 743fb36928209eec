//! Route guards.
//!
//! `CurrentUser` admits any logged-in session, `AdminUser` only the admin
//! role. A rejected request is redirected to the login page with a flash; the
//! login guard also remembers the requested path for the post-login redirect.

use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Redirect, Response};
use http::request::Parts;

use bookstore_domain::flash::Flash;
use bookstore_domain::user::Identity;

use crate::session::{Session, SessionSettings};

pub const LOGIN_PATH: &str = "/login";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";
pub const ADMIN_REQUIRED_MESSAGE: &str = "Admin access only! Please log in as an admin.";

/// Identity of a logged-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

/// Identity of a logged-in admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Identity);

fn login_redirect(session: Session) -> Response {
    (session, Redirect::to(LOGIN_PATH)).into_response()
}

impl<S> FromRequestParts<S> for CurrentUser
where
    SessionSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let mut session = Session::from_headers(&parts.headers, SessionSettings::from_ref(state));
        let result = match session.user().cloned() {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                session.flash(Flash::warning(LOGIN_REQUIRED_MESSAGE));
                session.set_next_url(parts.uri.path());
                Err(login_redirect(session))
            }
        };
        async move { result }
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    SessionSettings: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let mut session = Session::from_headers(&parts.headers, SessionSettings::from_ref(state));
        let result = match session.user().cloned() {
            Some(user) if user.is_admin() => Ok(AdminUser(user)),
            _ => {
                session.flash(Flash::danger(ADMIN_REQUIRED_MESSAGE));
                Err(login_redirect(session))
            }
        };
        async move { result }
    }
}
