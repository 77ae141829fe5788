use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    error::{AppError, AppResult},
    records::{self, StoreError},
    routes::{form_input, store_failure},
    state::AppState,
    types::{FieldError, StudentForm},
    validation::parse_student,
    views::{render, render_with_status, AddStudentView, StudentsView},
};

pub async fn list_students(State(state): State<AppState>) -> AppResult<Html<String>> {
    let students = records::retrieve_students(&state.db).await.map_err(|e| {
        store_failure(
            &state,
            "Error while retrieving students, ensure the database is in use/exists".to_string(),
            e,
        )
    })?;
    render(&StudentsView { students })
}

pub async fn delete_student(State(state): State<AppState>, Path(sid): Path<String>) -> AppResult<Redirect> {
    match records::delete_student(&state.db, &sid).await {
        Ok(0) => Err(AppError::NotFound(format!("No such student with id = {}", sid))),
        Ok(_) => {
            state.metrics.inc_students_deleted();
            tracing::info!(sid = %sid, "Deleted student");
            Ok(Redirect::to("/students"))
        }
        Err(StoreError::ForeignKey(msg)) => {
            tracing::warn!(sid = %sid, "Refusing to delete enrolled student: {}", msg);
            Err(AppError::Conflict(format!("Error: {} has associated modules, student cannot be deleted", sid)))
        }
        Err(e) => Err(store_failure(&state, format!("Error while deleting student {}", sid), e)),
    }
}

pub async fn add_student_form() -> AppResult<Html<String>> {
    render(&AddStudentView::default())
}

pub async fn add_student(
    State(state): State<AppState>,
    form: Result<Form<StudentForm>, FormRejection>,
) -> AppResult<Response> {
    let form = form_input(form)?;
    let student = match parse_student(&form) {
        Ok(student) => student,
        Err(errors) => {
            state.metrics.inc_validation_failures();
            let view = AddStudentView::with_input(errors, &form);
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &view)?.into_response());
        }
    };

    match records::add_student(&state.db, &student).await {
        Ok(()) => {
            state.metrics.inc_students_added();
            tracing::info!(sid = %student.sid, "Added student");
            Ok(Redirect::to("/students").into_response())
        }
        Err(e) => {
            // The store's own message goes back onto the form
            state.metrics.inc_store_errors();
            tracing::warn!(sid = %student.sid, "Failed to add student: {}", e);
            let errors = vec![FieldError::general(format!("Error: {}", e))];
            let status = AppError::from(e).status();
            let view = AddStudentView::with_input(errors, &form);
            Ok(render_with_status(status, &view)?.into_response())
        }
    }
}
