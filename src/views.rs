//! Server-side HTML views.
//!
//! Each struct binds one template under `templates/`. Values are HTML-escaped by askama.

use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::error::AppResult;
use crate::types::{FieldError, Lecturer, LecturerForm, Module, ModuleForm, Student, StudentForm};

#[derive(Template)]
#[template(path = "students.html")]
pub struct StudentsView {
    pub students: Vec<Student>,
}

#[derive(Template, Default)]
#[template(path = "add_student.html")]
pub struct AddStudentView {
    pub errors: Vec<FieldError>,
    pub sid: String,
    pub name: String,
    pub gpa: String,
}

impl AddStudentView {
    pub fn with_input(errors: Vec<FieldError>, form: &StudentForm) -> Self {
        Self { errors, sid: form.sid.clone(), name: form.name.clone(), gpa: form.gpa.clone() }
    }
}

#[derive(Template)]
#[template(path = "modules.html")]
pub struct ModulesView {
    pub modules: Vec<Module>,
}

#[derive(Template)]
#[template(path = "edit_module.html")]
pub struct EditModuleView {
    pub errors: Vec<FieldError>,
    pub module: ModuleForm,
}

#[derive(Template)]
#[template(path = "studying.html")]
pub struct StudyingView {
    pub mid: String,
    pub students: Vec<Student>,
}

#[derive(Template)]
#[template(path = "lecturers.html")]
pub struct LecturersView {
    pub lecturers: Vec<Lecturer>,
}

#[derive(Template, Default)]
#[template(path = "add_lecturer.html")]
pub struct AddLecturerView {
    pub errors: Vec<FieldError>,
    pub id: String,
    pub name: String,
    pub dept: String,
}

impl AddLecturerView {
    pub fn with_input(errors: Vec<FieldError>, form: &LecturerForm) -> Self {
        Self { errors, id: form.id.clone(), name: form.name.clone(), dept: form.dept.clone() }
    }
}

/// A one-line notice or error followed by a link home.
#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageView {
    pub title: String,
    pub message: String,
    pub error_id: Option<String>,
}

impl MessageView {
    pub fn new(title: &str, message: impl Into<String>) -> Self {
        Self { title: title.to_string(), message: message.into(), error_id: None }
    }
}

pub fn render<T: Template>(view: &T) -> AppResult<Html<String>> {
    Ok(Html(view.render()?))
}

/// Renders a view with an explicit status, e.g. a form re-shown after validation failed.
pub fn render_with_status<T: Template>(status: StatusCode, view: &T) -> AppResult<(StatusCode, Html<String>)> {
    Ok((status, Html(view.render()?)))
}
