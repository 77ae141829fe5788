use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt; // for .collect()
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::lecturers::{SharedLecturerStore, SqliteLecturers};
use crate::state::AppState;
use crate::{db, routes};

/// A router over a seeded temporary database. The directory lives as long as the app.
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    _dir: TempDir,
}

pub async fn setup_test_db(dir: &TempDir) -> SqlitePool {
    let db_url = format!("sqlite://{}", dir.path().join("collegedb.db").display());
    let pool = db::connect(&db_url, 1).await.unwrap();
    db::init_db(&pool).await.unwrap();
    db::seed_demo_data(&pool).await.unwrap();
    pool
}

pub async fn setup_test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let pool = setup_test_db(&dir).await;

    let lecturers = SqliteLecturers::new(pool.clone());
    lecturers.init().await.unwrap();

    build_app(dir, pool, Arc::new(lecturers))
}

/// Like [`setup_test_app`], but lecturers live in their own database file.
///
/// Returns the lecturer pool as well so a test can take that store down on its own.
pub async fn setup_test_app_with_separate_lecturers() -> (TestApp, SqlitePool) {
    let dir = TempDir::new().unwrap();
    let pool = setup_test_db(&dir).await;

    let lecturer_url = format!("sqlite://{}", dir.path().join("lecturers.db").display());
    let lecturer_pool = db::connect(&lecturer_url, 1).await.unwrap();
    let lecturers = SqliteLecturers::new(lecturer_pool.clone());
    lecturers.init().await.unwrap();

    (build_app(dir, pool, Arc::new(lecturers)), lecturer_pool)
}

fn build_app(dir: TempDir, pool: SqlitePool, lecturers: SharedLecturerStore) -> TestApp {
    let state = AppState::new(pool, lecturers, AppConfig::default());
    let app = routes::router(state.clone());
    TestApp { app, state, _dir: dir }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// A urlencoded form POST, as a browser would send it.
pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
