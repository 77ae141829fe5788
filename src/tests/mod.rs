//! Tests for the college records application.
//!
//! - **support**: shared fixtures (temporary database, router, request helpers)
//! - **config_tests**: configuration defaults, layering and validation
//! - **db_tests**: schema, demo data and relational queries
//! - **lecturer_store_tests**: document store backends
//! - **student_routes_tests**, **module_routes_tests**, **lecturer_routes_tests**: pages end to end
//! - **health_api_tests**: probes, metrics, version and response headers
//! - **error_tests**: error classification and error pages
//!
//! Run a single group with e.g. `cargo test student_routes_tests`.

pub mod support;

pub mod db_tests;
pub mod error_tests;
