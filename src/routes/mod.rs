//! HTTP route handlers for the college records site.
//!
//! - `students`: list, add and delete students (relational store)
//! - `modules`: list and edit modules, list students enrolled on a module
//! - `lecturers`: list and add lecturers (document store)
//! - `health`: liveness, readiness, metrics and version endpoints

pub mod health;
pub mod lecturers;
pub mod modules;
pub mod students;

use std::path::PathBuf;

use axum::extract::{rejection::FormRejection, DefaultBodyLimit};
use axum::middleware::from_fn_with_state;
use axum::{routing::get, Form, Router};
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::error::AppError;
use crate::middleware::security_headers::security_headers_middleware;
use crate::records::StoreError;
use crate::state::AppState;

const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Static assets: `<exe_dir>/static` when present, otherwise the source tree copy.
pub fn static_root() -> PathBuf {
    let runtime = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.join("static")))
        .unwrap_or_else(|| PathBuf::from("static"));
    if runtime.join("home.html").is_file() {
        runtime
    } else {
        PathBuf::from(STATIC_DIR)
    }
}

/// Builds the full application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let static_dir = static_root();
    let home = ServeFile::new(static_dir.join("home.html"));
    let max_body = state.config.server.max_body_bytes;
    let cfg = state.config.clone();

    Router::new()
        .route_service("/", home)
        .route("/students", get(students::list_students))
        .route("/students/delete/{sid}", get(students::delete_student))
        .route("/addStudent", get(students::add_student_form).post(students::add_student))
        .route("/modules", get(modules::list_modules))
        .route("/module/edit/{mid}", get(modules::edit_module_form).post(modules::update_module))
        .route("/module/students/{mid}", get(modules::studying_module))
        .route("/lecturers", get(lecturers::list_lecturers))
        .route("/addLecturer", get(lecturers::add_lecturer_form).post(lecturers::add_lecturer))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg, security_headers_middleware))
}

/// Logs a relational store failure and turns it into the page the user sees.
///
/// The status follows the failure class; the text is `message`.
pub(crate) fn store_failure(state: &AppState, message: String, err: StoreError) -> AppError {
    state.metrics.inc_store_errors();
    tracing::error!("{}: {}", message, err);
    match AppError::from(err) {
        AppError::ServiceUnavailable(_) => AppError::ServiceUnavailable(message),
        AppError::Conflict(_) => AppError::Conflict(message),
        _ => AppError::Database(message),
    }
}

/// Unwraps a submitted form. A body that cannot be read as a form becomes a 400 error page.
pub(crate) fn form_input<T>(form: Result<Form<T>, FormRejection>) -> Result<T, AppError> {
    match form {
        Ok(Form(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejected form submission: {}", rejection.body_text());
            Err(AppError::BadRequest(rejection.body_text()))
        }
    }
}
