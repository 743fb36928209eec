use axum::{extract::State, response::Response};

use bookstore_domain::flash::Flash;
use bookstore_session::{CurrentUser, Session};

use crate::error::StorefrontError;
use crate::handlers::redirect;
use crate::state::AppState;
use crate::usecase::order::CheckoutUseCase;

// ── POST /checkout ───────────────────────────────────────────────────────────

pub async fn checkout(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    mut session: Session,
) -> Response {
    let usecase = CheckoutUseCase {
        repo: state.order_repo(),
    };
    match usecase.execute(user.user_id).await {
        Ok(()) => {
            session.flash(Flash::success("Order placed successfully! ✅"));
            redirect(session, "/profile")
        }
        Err(e) => {
            let message = match e {
                StorefrontError::Rejected(message) => message,
                other => {
                    tracing::error!(error = ?other, user_id = %user.user_id, "checkout failed");
                    "could not place order".to_owned()
                }
            };
            session.flash(Flash::danger(format!("Error placing order: {message}")));
            redirect(session, "/cart")
        }
    }
}
