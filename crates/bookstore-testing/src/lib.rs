//! Test utilities for the bookstore services.
//!
//! Provides `MockSession` for logged-in requests and helpers to drive a
//! `Router` and inspect its responses.
//! Dev-dependency only.

pub mod client;
pub mod session;
