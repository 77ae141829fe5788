use std::sync::Arc;

use crate::config::AppConfig;
use crate::lecturers::SharedLecturerStore;
use crate::metrics::Metrics;

/// The shared application state.
///
/// Cloned into every handler by Axum; all members are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Pool for the relational store (students, modules, departments, enrollments).
    pub db: sqlx::SqlitePool,
    /// Document store holding lecturers.
    pub lecturers: SharedLecturerStore,
    pub config: Arc<AppConfig>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, lecturers: SharedLecturerStore, config: AppConfig) -> Self {
        Self { db, lecturers, config: Arc::new(config), metrics: Metrics::new() }
    }
}
