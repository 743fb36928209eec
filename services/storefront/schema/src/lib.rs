//! sea-orm entities for the storefront tables the service touches directly.
//!
//! The schema itself, its triggers and its procedures are owned by the
//! database; these entities only mirror the columns read or written here.

pub mod books;
pub mod cart;
pub mod cart_items;
pub mod order_items;
pub mod users;
