use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::time::Duration;

// Health check endpoint - lightweight, touches no datastore
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: both datastores must answer within the timeout
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let timeout = Duration::from_secs(5);

    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(timeout, query).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => return (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: database: {}", e)).into_response(),
        Err(_) => return (StatusCode::SERVICE_UNAVAILABLE, "not ready: database timeout").into_response(),
    }

    match tokio::time::timeout(timeout, state.lecturers.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: lecturers: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: lecturers timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let counters = [
        ("students_added", "Students added", m.students_added),
        ("students_deleted", "Students deleted", m.students_deleted),
        ("modules_updated", "Modules updated", m.modules_updated),
        ("lecturers_added", "Lecturers added", m.lecturers_added),
        ("validation_failures", "Form submissions rejected by validation", m.validation_failures),
        ("store_errors", "Datastore operations that failed", m.store_errors),
    ];
    let mut body = String::new();
    for (name, help, value) in counters {
        body.push_str(&format!(
            "# HELP collegeweb_{name} {help}\n# TYPE collegeweb_{name} counter\ncollegeweb_{name} {value}\n"
        ));
    }
    body.push_str(&format!(
        "# HELP collegeweb_uptime_seconds Uptime seconds\n# TYPE collegeweb_uptime_seconds gauge\ncollegeweb_uptime_seconds {}\n",
        m.uptime_seconds
    ));
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "lecturer_backend": state.lecturers.backend(),
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
