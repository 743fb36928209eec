use bookstore_domain::id::UserId;

use crate::domain::repository::OrderRepository;
use crate::error::StorefrontError;

pub struct CheckoutUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> CheckoutUseCase<R> {
    /// `place_order` turns the cart into an order; stock and totals are its
    /// business.
    pub async fn execute(&self, user_id: UserId) -> Result<(), StorefrontError> {
        self.repo.place_order(user_id).await?;
        tracing::info!(user_id = %user_id, "order placed");
        Ok(())
    }
}
