use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};

use crate::{
    error::{AppError, AppResult, OptionExt},
    records,
    routes::{form_input, store_failure},
    state::AppState,
    types::{ModuleForm, Student},
    validation::parse_module_update,
    views::{render, render_with_status, EditModuleView, MessageView, ModulesView, StudyingView},
};

pub async fn list_modules(State(state): State<AppState>) -> AppResult<Html<String>> {
    let modules = records::retrieve_modules(&state.db).await.map_err(|e| {
        store_failure(
            &state,
            "Error occurred while retrieving modules, ensure the database is in use/exists".to_string(),
            e,
        )
    })?;
    render(&ModulesView { modules })
}

pub async fn edit_module_form(State(state): State<AppState>, Path(mid): Path<String>) -> AppResult<Html<String>> {
    let module = records::retrieve_module(&state.db, &mid)
        .await
        .map_err(|e| store_failure(&state, "Error occurred while retrieving specified module".to_string(), e))?
        .ok_or_not_found(format!("No such module with id = {}", mid))?;
    render(&EditModuleView { errors: Vec::new(), module: ModuleForm::from(&module) })
}

/// Applies the edit form. The module key comes from the path, not from the form body.
pub async fn update_module(
    State(state): State<AppState>,
    Path(mid): Path<String>,
    form: Result<Form<ModuleForm>, FormRejection>,
) -> AppResult<Response> {
    let mut form = form_input(form)?;
    form.mid = mid.clone();
    let (name, credits) = match parse_module_update(&form) {
        Ok(update) => update,
        Err(errors) => {
            state.metrics.inc_validation_failures();
            let view = EditModuleView { errors, module: form };
            return Ok(render_with_status(StatusCode::UNPROCESSABLE_ENTITY, &view)?.into_response());
        }
    };

    match records::update_module(&state.db, &mid, &name, credits).await {
        Ok(0) => Err(AppError::NotFound(format!("No such module with id = {}", mid))),
        Ok(_) => {
            state.metrics.inc_modules_updated();
            tracing::info!(mid = %mid, credits, "Updated module");
            Ok(Redirect::to("/modules").into_response())
        }
        Err(e) => {
            let message = format!("Cannot update module {}: {}", mid, e);
            Err(store_failure(&state, message, e))
        }
    }
}

pub async fn studying_module(State(state): State<AppState>, Path(mid): Path<String>) -> AppResult<Html<String>> {
    let students: Vec<Student> = records::studying_module(&state.db, &mid)
        .await
        .map_err(|e| store_failure(&state, format!("Cannot retrieve list of students studying {}", mid), e))?;

    if students.is_empty() {
        return render(&MessageView::new("Students", "No student is currently studying this module"));
    }
    render(&StudyingView { mid, students })
}
