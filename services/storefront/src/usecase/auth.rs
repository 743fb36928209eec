use crate::domain::repository::{OrderRepository, UserRepository};
use crate::domain::types::{OrderWithLines, Profile, Registration, User};
use crate::error::StorefrontError;
use bookstore_domain::id::UserId;

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<User, StorefrontError> {
        if input.email.is_empty() || input.password.is_empty() {
            return Err(StorefrontError::InvalidCredentials);
        }
        self.repo
            .find_by_credentials(&input.email, &input.password)
            .await?
            .ok_or(StorefrontError::InvalidCredentials)
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: Registration) -> Result<(), StorefrontError> {
        self.repo.register(&input).await?;
        tracing::info!("user registered");
        Ok(())
    }
}

// ── Profile ──────────────────────────────────────────────────────────────────

pub struct ProfileUseCase<U: UserRepository, O: OrderRepository> {
    pub users: U,
    pub orders: O,
}

impl<U: UserRepository, O: OrderRepository> ProfileUseCase<U, O> {
    /// The account plus every order from `view_order_history`, each with its
    /// line items.
    pub async fn execute(&self, user_id: UserId) -> Result<Profile, StorefrontError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(StorefrontError::UserNotFound)?;
        let summaries = self.orders.history(user_id).await?;
        let mut orders = Vec::with_capacity(summaries.len());
        for summary in summaries {
            let lines = self.orders.lines(summary.order_id).await?;
            orders.push(OrderWithLines { summary, lines });
        }
        Ok(Profile { user, orders })
    }
}
