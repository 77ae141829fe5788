use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request-level counters for the record pages.
#[derive(Clone)]
pub struct Metrics {
    pub students_added: Arc<AtomicU64>,
    pub students_deleted: Arc<AtomicU64>,
    pub modules_updated: Arc<AtomicU64>,
    pub lecturers_added: Arc<AtomicU64>,
    pub validation_failures: Arc<AtomicU64>,
    pub store_errors: Arc<AtomicU64>,
    pub start_time: Instant,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            students_added: Arc::new(AtomicU64::new(0)),
            students_deleted: Arc::new(AtomicU64::new(0)),
            modules_updated: Arc::new(AtomicU64::new(0)),
            lecturers_added: Arc::new(AtomicU64::new(0)),
            validation_failures: Arc::new(AtomicU64::new(0)),
            store_errors: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
            started_at: chrono::Utc::now(),
        }
    }

    pub fn inc_students_added(&self) {
        self.students_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_students_deleted(&self) {
        self.students_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_modules_updated(&self) {
        self.modules_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_lecturers_added(&self) {
        self.lecturers_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_store_errors(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            students_added: self.students_added.load(Ordering::Relaxed),
            students_deleted: self.students_deleted.load(Ordering::Relaxed),
            modules_updated: self.modules_updated.load(Ordering::Relaxed),
            lecturers_added: self.lecturers_added.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            started_at: self.started_at.to_rfc3339(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub students_added: u64,
    pub students_deleted: u64,
    pub modules_updated: u64,
    pub lecturers_added: u64,
    pub validation_failures: u64,
    pub store_errors: u64,
    pub uptime_seconds: u64,
    pub started_at: String,
}
