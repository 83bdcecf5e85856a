//! HTTP route layer
//!
//! Thin by design: handlers translate between HTTP and the
//! aggregator and perform no business logic of their own.

pub mod files;
pub mod health;

pub use files::file_routes;
pub use health::health_routes;
