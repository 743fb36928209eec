//! Cookie-backed sessions for the storefront.
//!
//! Provides the signed session codec, cookie builders, the `Session`
//! extractor and the `CurrentUser` / `AdminUser` route guards.

pub mod cookie;
pub mod guard;
pub mod session;
pub mod token;

pub use guard::{AdminUser, CurrentUser};
pub use session::{Session, SessionSettings};
