use axum::{extract::State, response::Response};
use rust_decimal::Decimal;
use serde::Serialize;

use bookstore_domain::flash::Flash;
use bookstore_domain::user::UserRole;
use bookstore_session::{CurrentUser, Session};

use crate::domain::types::{OrderWithLines, Profile, ResultRow};
use crate::error::StorefrontError;
use crate::handlers::redirect;
use crate::state::AppState;
use crate::usecase::auth::ProfileUseCase;

#[derive(Serialize)]
pub struct ProfileUser {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: UserRole,
}

#[derive(Serialize)]
pub struct OrderItemView {
    pub title: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// A `view_order_history` row with its line items alongside.
#[derive(Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub columns: ResultRow,
    pub items: Vec<OrderItemView>,
}

#[derive(Serialize)]
pub struct ProfilePage {
    pub user: ProfileUser,
    pub orders: Vec<OrderView>,
}

impl From<OrderWithLines> for OrderView {
    fn from(order: OrderWithLines) -> Self {
        Self {
            columns: order.summary.columns,
            items: order
                .lines
                .into_iter()
                .map(|line| OrderItemView {
                    title: line.title,
                    quantity: line.quantity,
                    price: line.price,
                })
                .collect(),
        }
    }
}

impl From<Profile> for ProfilePage {
    fn from(profile: Profile) -> Self {
        Self {
            user: ProfileUser {
                name: profile.user.name,
                email: profile.user.email,
                address: profile.user.address,
                role: profile.user.role,
            },
            orders: profile.orders.into_iter().map(OrderView::from).collect(),
        }
    }
}

// ── GET /profile ─────────────────────────────────────────────────────────────

pub async fn profile(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    mut session: Session,
) -> Result<Response, StorefrontError> {
    let usecase = ProfileUseCase {
        users: state.user_repo(),
        orders: state.order_repo(),
    };
    match usecase.execute(user.user_id).await {
        Ok(profile) => Ok(session.render("profile.html", ProfilePage::from(profile))),
        // The account behind the session is gone.
        Err(StorefrontError::UserNotFound) => {
            session.clear();
            session.flash(Flash::warning(bookstore_session::guard::LOGIN_REQUIRED_MESSAGE));
            Ok(redirect(session, "/login"))
        }
        Err(e) => Err(e),
    }
}
