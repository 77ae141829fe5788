use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    error::{AppError, AppResult},
    lecturers::LecturerStoreError,
    records,
    routes::{form_input, store_failure},
    state::AppState,
    types::{FieldError, Lecturer, LecturerForm},
    validation::validate_lecturer,
    views::{render, render_with_status, AddLecturerView, LecturersView},
};

pub async fn list_lecturers(State(state): State<AppState>) -> AppResult<Html<String>> {
    let lecturers = state.lecturers.retrieve_lecturers().await.map_err(|e| {
        state.metrics.inc_store_errors();
        tracing::error!(backend = state.lecturers.backend(), "Failed to retrieve lecturers: {}", e);
        let message = format!("Error while retrieving lecturers: {}", e);
        match AppError::from(e) {
            AppError::ServiceUnavailable(_) => AppError::ServiceUnavailable(message),
            _ => AppError::Database(message),
        }
    })?;
    render(&LecturersView { lecturers })
}

pub async fn add_lecturer_form() -> AppResult<Html<String>> {
    render(&AddLecturerView::default())
}

fn form_error(status: StatusCode, msg: String, form: &LecturerForm) -> AppResult<Response> {
    let view = AddLecturerView::with_input(vec![FieldError::general(msg)], form);
    Ok(render_with_status(status, &view)?.into_response())
}

/// Adds a lecturer after checking the form and that the department exists in the
/// relational store.
pub async fn add_lecturer(
    State(state): State<AppState>,
    form: Result<Form<LecturerForm>, FormRejection>,
) -> AppResult<Response> {
    let form = form_input(form)?;
    let errors = validate_lecturer(&form);
    if !errors.is_empty() {
        state.metrics.inc_validation_failures();
        let view = AddLecturerView::with_input(errors, &form);
        return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &view)?.into_response());
    }

    let dept = records::retrieve_department(&state.db, &form.dept)
        .await
        .map_err(|e| store_failure(&state, format!("Error while looking up department {}", form.dept), e))?;
    let Some(dept) = dept else {
        state.metrics.inc_validation_failures();
        return form_error(StatusCode::UNPROCESSABLE_ENTITY, "Dept doesn't exist".to_string(), &form);
    };

    // Stored under the department's own spelling of its id
    let mut lecturer = Lecturer::from(&form);
    lecturer.dept = dept.did;
    match state.lecturers.add_lecturer(&lecturer).await {
        Ok(()) => {
            state.metrics.inc_lecturers_added();
            tracing::info!(id = %lecturer.id, dept = %lecturer.dept, "Added lecturer");
            Ok(Redirect::to("/lecturers").into_response())
        }
        Err(LecturerStoreError::DuplicateKey(msg)) => {
            tracing::debug!(id = %lecturer.id, "Duplicate lecturer key: {}", msg);
            form_error(StatusCode::CONFLICT, "_id already exists".to_string(), &form)
        }
        Err(e) => {
            state.metrics.inc_store_errors();
            tracing::error!(backend = state.lecturers.backend(), "Failed to add lecturer: {}", e);
            let msg = format!("Error: {}", e);
            form_error(AppError::from(e).status(), msg, &form)
        }
    }
}
