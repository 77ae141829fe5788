use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::error::Error;
use std::fmt;

use crate::lecturers::LecturerStoreError;
use crate::records::StoreError;
use crate::views::MessageView;

/// The primary error type for the application.
///
/// Every variant renders as an HTML page carrying the message and a link home.
#[derive(Debug)]
pub enum AppError {
    /// For internal server errors that are not expected to be handled by the client.
    Internal(anyhow::Error),
    /// For request bodies that cannot be read as the expected form.
    BadRequest(String),
    /// For when a requested record does not exist.
    NotFound(String),
    /// For when a request conflicts with stored data, e.g. deleting an enrolled student.
    Conflict(String),
    /// For when a datastore cannot be reached.
    ServiceUnavailable(String),
    /// For datastore failures whose message is shown to the user as-is.
    Database(String),
    /// For template rendering failures.
    Render(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(e) => write!(f, "Internal error: {}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) | AppError::Database(_) | AppError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, error_id) = match self {
            AppError::Internal(e) => {
                let error_id = uuid::Uuid::new_v4().to_string();
                tracing::error!(error_id = %error_id, "Internal error: {:?}", e);
                ("An internal server error occurred".to_string(), Some(error_id))
            }
            AppError::Render(msg) => {
                let error_id = uuid::Uuid::new_v4().to_string();
                tracing::error!(error_id = %error_id, "Template rendering failed: {}", msg);
                ("An internal server error occurred".to_string(), Some(error_id))
            }
            AppError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                (msg, None)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (msg, None)
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => (msg, None),
        };

        let view = MessageView {
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            error_id,
        };
        match view.render() {
            Ok(body) => (status, Html(body)).into_response(),
            // Plain markup if the template itself is broken
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, Html(format!("<h1>{}</h1> <p><a href=\"/\">Home</a></p>", status))).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Render(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ForeignKey(msg) | StoreError::Duplicate(msg) | StoreError::Check(msg) => {
                AppError::Conflict(msg)
            }
            StoreError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            StoreError::Other(msg) => AppError::Database(msg),
        }
    }
}

impl From<LecturerStoreError> for AppError {
    fn from(err: LecturerStoreError) -> Self {
        match err {
            LecturerStoreError::DuplicateKey(msg) => AppError::Conflict(msg),
            LecturerStoreError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            LecturerStoreError::Other(msg) => AppError::Database(msg),
        }
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// An extension trait for `Option` that provides a convenient way to convert
/// an `Option` to a `Result` with a `NotFound` error.
pub trait OptionExt<T> {
    /// Converts `None` into `AppError::NotFound` with the given message.
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(message.into()))
    }
}
