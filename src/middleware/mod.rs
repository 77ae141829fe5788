//! Middleware components for HTTP request processing.
//!
//! Only response hardening lives here; request size limits and compression come from
//! Axum and tower-http layers wired up in [`crate::routes::router`].

pub mod security_headers;
