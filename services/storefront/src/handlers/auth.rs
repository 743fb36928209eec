use axum::{Form, extract::State, response::Response};
use serde::Deserialize;

use bookstore_domain::flash::Flash;
use bookstore_session::{CurrentUser, Session};

use crate::domain::types::Registration;
use crate::error::StorefrontError;
use crate::handlers::redirect;
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RegisterUseCase};

pub const LOGIN_TEMPLATE: &str = "login.html";
pub const REGISTER_TEMPLATE: &str = "register.html";

const DATABASE_ERROR_MESSAGE: &str = "Database connection error.";

// ── GET / ────────────────────────────────────────────────────────────────────

pub async fn home(session: Session) -> Response {
    let to = if session.user().is_some() {
        "/search"
    } else {
        "/login"
    };
    redirect(session, to)
}

// ── GET|POST /login ──────────────────────────────────────────────────────────

pub async fn login_page(session: Session) -> Response {
    session.render(LOGIN_TEMPLATE, ())
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, StorefrontError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
    };
    let result = usecase
        .execute(LoginInput {
            email: form.email,
            password: form.password,
        })
        .await;
    let user = match result {
        Ok(user) => user,
        Err(StorefrontError::InvalidCredentials) => {
            session.flash(Flash::danger(
                "Invalid email or password. Please try again.",
            ));
            return Ok(session.render(LOGIN_TEMPLATE, ()));
        }
        Err(StorefrontError::DatabaseUnavailable) => {
            session.flash(Flash::danger(DATABASE_ERROR_MESSAGE));
            return Ok(session.render(LOGIN_TEMPLATE, ()));
        }
        Err(e) => return Err(e),
    };

    tracing::info!(user_id = %user.user_id, role = %user.role, "user logged in");
    session.flash(Flash::success(format!("Welcome back, {}!", user.name)));
    session.login(user.identity());
    let to = session.take_next_url().unwrap_or_else(|| {
        if user.role.is_admin() {
            "/admin/books".to_owned()
        } else {
            "/profile".to_owned()
        }
    });
    Ok(redirect(session, &to))
}

// ── GET /logout ──────────────────────────────────────────────────────────────

pub async fn logout(CurrentUser(user): CurrentUser, mut session: Session) -> Response {
    tracing::info!(user_id = %user.user_id, "user logged out");
    session.clear();
    session.flash(Flash::info("You have been logged out successfully."));
    redirect(session, "/login")
}

// ── GET|POST /register ───────────────────────────────────────────────────────

pub async fn register_page(session: Session) -> Response {
    session.render(REGISTER_TEMPLATE, ())
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: String,
}

pub async fn register(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
    };
    let result = usecase
        .execute(Registration {
            name: form.name,
            email: form.email,
            password: form.password,
            address: form.address,
        })
        .await;
    let flash = match result {
        Ok(()) => {
            session.flash(Flash::success("Registration successful! Please log in."));
            return redirect(session, "/login");
        }
        Err(StorefrontError::EmailTaken) => {
            Flash::danger("An account with this email already exists.")
        }
        Err(StorefrontError::DatabaseUnavailable) => Flash::danger(DATABASE_ERROR_MESSAGE),
        Err(e) => {
            tracing::error!(error = ?e, "registration failed");
            Flash::danger("An error occurred. Please try again.")
        }
    };
    session.flash(flash);
    session.render(REGISTER_TEMPLATE, ())
}
