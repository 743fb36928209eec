//! Domain types shared by the bookstore services.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers as well as the session crate.

pub mod flash;
pub mod id;
pub mod user;
