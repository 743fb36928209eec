//! Shared plumbing for the bookstore services: tracing, request ids,
//! health probes, database connection and page rendering.

pub mod db;
pub mod health;
pub mod middleware;
pub mod tracing;
pub mod view;
