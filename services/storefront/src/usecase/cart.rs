use bookstore_domain::id::{BookId, CartItemId, UserId};

use crate::domain::repository::CartRepository;
use crate::domain::types::{Cart, StockCheck, clamp_to_stock, parse_quantity};
use crate::error::StorefrontError;

// ── ViewCart ─────────────────────────────────────────────────────────────────

pub struct ViewCartUseCase<R: CartRepository> {
    pub repo: R,
}

impl<R: CartRepository> ViewCartUseCase<R> {
    pub async fn execute(&self, user_id: UserId) -> Result<Cart, StorefrontError> {
        let lines = self.repo.lines(user_id).await?;
        Ok(Cart::from_lines(lines))
    }
}

// ── AddToCart ────────────────────────────────────────────────────────────────

pub struct AddToCartUseCase<R: CartRepository> {
    pub repo: R,
}

impl<R: CartRepository> AddToCartUseCase<R> {
    /// A missing quantity means one copy.
    pub async fn execute(
        &self,
        user_id: UserId,
        book_id: BookId,
        quantity: Option<&str>,
    ) -> Result<(), StorefrontError> {
        let quantity = match quantity {
            None => 1,
            Some(raw) => parse_quantity(raw)
                .filter(|q| *q >= 1)
                .ok_or(StorefrontError::InvalidQuantity)?,
        };
        self.repo.add(user_id, book_id, quantity).await?;
        tracing::info!(user_id = %user_id, book_id = %book_id, quantity, "book added to cart");
        Ok(())
    }
}

// ── UpdateCartItem ───────────────────────────────────────────────────────────

pub struct UpdateCartItemUseCase<R: CartRepository> {
    pub repo: R,
}

impl<R: CartRepository> UpdateCartItemUseCase<R> {
    /// Stock is read, then the row written, with nothing held in between.
    pub async fn execute(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: &str,
    ) -> Result<StockCheck, StorefrontError> {
        let requested = parse_quantity(quantity).ok_or(StorefrontError::InvalidQuantity)?;
        if requested < 1 {
            return Err(StorefrontError::QuantityBelowOne);
        }
        let stock = self
            .repo
            .stock_for_item(user_id, item_id)
            .await?
            .ok_or(StorefrontError::CartItemNotFound)?;
        let check = clamp_to_stock(requested, stock);
        if !self
            .repo
            .set_quantity(user_id, item_id, check.quantity)
            .await?
        {
            return Err(StorefrontError::CartItemNotFound);
        }
        Ok(check)
    }
}

// ── RemoveCartItem ───────────────────────────────────────────────────────────

pub struct RemoveCartItemUseCase<R: CartRepository> {
    pub repo: R,
}

impl<R: CartRepository> RemoveCartItemUseCase<R> {
    pub async fn execute(&self, user_id: UserId, item_id: CartItemId) -> Result<(), StorefrontError> {
        if !self.repo.remove(user_id, item_id).await? {
            return Err(StorefrontError::CartItemNotFound);
        }
        Ok(())
    }
}
