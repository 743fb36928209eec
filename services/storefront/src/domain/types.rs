use rust_decimal::Decimal;

use bookstore_domain::id::{BookId, CartItemId, OrderId, UserId};
use bookstore_domain::user::{Identity, UserRole};

/// Storefront account as read from `users`.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub role: UserRole,
}

impl User {
    /// What the session remembers about a logged-in user.
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.user_id,
            username: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Arguments of the `register_user` procedure.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct Book {
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub price: Decimal,
    /// Units in stock.
    pub quantity: i32,
}

/// Column values for an admin insert or update of `books`.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

impl BookDraft {
    /// Parse raw form values. Only the column types are enforced.
    pub fn parse(
        title: String,
        author: String,
        category: Option<String>,
        price: &str,
        quantity: &str,
    ) -> Option<Self> {
        let price = price.trim().parse::<Decimal>().ok()?;
        let quantity = parse_quantity(quantity)?;
        let category = category.filter(|c| !c.trim().is_empty());
        Some(Self {
            title,
            author,
            category,
            price,
            quantity,
        })
    }
}

/// One row of the cart page.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub cart_item_id: CartItemId,
    pub book_id: BookId,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub quantity: i32,
    pub subtotal: Decimal,
    /// Units of the book currently in stock.
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl Cart {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let total = lines.iter().map(|line| line.subtotal).sum();
        Self { lines, total }
    }
}

/// Columns of one row yielded by a database function, keyed by column name.
pub type ResultRow = serde_json::Map<String, serde_json::Value>;

/// Row of `view_order_history(user)`. Every column is kept in `columns`;
/// `order_id` is also read out to look up the order's lines.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub columns: ResultRow,
}

#[derive(Debug, Clone)]
pub struct OrderLine {
    pub title: String,
    pub quantity: i32,
    pub price: Decimal,
}

#[derive(Debug, Clone)]
pub struct OrderWithLines {
    pub summary: OrderSummary,
    pub lines: Vec<OrderLine>,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub orders: Vec<OrderWithLines>,
}

/// Parse a form quantity the way a user types it: surrounding whitespace is
/// ignored, anything that is not a whole number is rejected.
pub fn parse_quantity(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Result of checking a requested cart quantity against stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockCheck {
    pub quantity: i32,
    /// Set when the request exceeded stock; holds the stock it was cut to.
    pub clamped_to: Option<i32>,
}

/// Reduce `requested` to `stock` when it exceeds it.
pub fn clamp_to_stock(requested: i32, stock: i32) -> StockCheck {
    if requested > stock {
        StockCheck {
            quantity: stock,
            clamped_to: Some(stock),
        }
    } else {
        StockCheck {
            quantity: requested,
            clamped_to: None,
        }
    }
}
