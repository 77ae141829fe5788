//! # collegeweb
//!
//! A small web application for managing college records: students, modules and the
//! students enrolled on them live in a relational store, lecturers in a document store.
//! Every page is rendered on the server.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: SQLite pool for the relational records
//! - **MongoDB**: lecturer documents (SQLite-backed documents as an alternative)
//! - **Askama**: compile-time checked HTML templates
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded defaults, file, environment)
//! - [`db`]: pool setup, schema creation and demo data
//! - [`records`]: relational data access (students, modules, departments, enrollments)
//! - [`lecturers`]: document data access for lecturers
//! - [`validation`]: form field rules
//! - [`views`]: template bindings
//! - [`routes`]: HTTP handlers and the router
//! - [`error`]: error pages
//! - [`metrics`], [`middleware`], [`state`], [`types`]

pub mod config;
pub mod db;
pub mod error;
pub mod lecturers;
pub mod metrics;
pub mod middleware;
pub mod records;
pub mod routes;
pub mod state;
pub mod types;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;
