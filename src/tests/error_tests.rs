#[cfg(test)]
mod tests {
    use axum::http::{header::CONTENT_TYPE, StatusCode};
    use axum::response::IntoResponse;

    use crate::error::{AppError, AppResult, OptionExt};
    use crate::lecturers::LecturerStoreError;
    use crate::records::StoreError;
    use crate::tests::support::body_string;

    #[test]
    fn test_app_error_display() {
        let error = AppError::NotFound("No such module with id = X".to_string());
        assert_eq!(format!("{}", error), "Not found: No such module with id = X");

        let error = AppError::Conflict("busy".to_string());
        assert_eq!(format!("{}", error), "Conflict: busy");
    }

    #[test]
    fn test_app_error_status() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        assert_eq!(AppError::ServiceUnavailable("x".into()).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::Database("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Render("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_error_page_is_html_with_home_link() {
        let response = AppError::NotFound("No such student with id = G999".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(CONTENT_TYPE).unwrap().to_str().unwrap().starts_with("text/html"));

        let body = body_string(response).await;
        assert!(body.contains("<h1>No such student with id = G999</h1>"));
        assert!(body.contains(r#"<a href="/">Home</a>"#));
    }

    #[tokio::test]
    async fn test_internal_error_hides_details_and_shows_error_id() {
        let response = AppError::Internal(anyhow::anyhow!("secret connection string")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_string(response).await;
        assert!(!body.contains("secret connection string"));
        assert!(body.contains("Error ID:"));
    }

    #[tokio::test]
    async fn test_error_page_escapes_message() {
        let response = AppError::NotFound("No such student with id = <script>".into()).into_response();
        let body = body_string(response).await;
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_from_store_error() {
        assert!(matches!(AppError::from(StoreError::ForeignKey("fk".into())), AppError::Conflict(_)));
        assert!(matches!(AppError::from(StoreError::Duplicate("dup".into())), AppError::Conflict(_)));
        assert!(matches!(AppError::from(StoreError::Check("chk".into())), AppError::Conflict(_)));
        assert!(matches!(AppError::from(StoreError::Unavailable("down".into())), AppError::ServiceUnavailable(_)));
        assert!(matches!(AppError::from(StoreError::Other("x".into())), AppError::Database(_)));
    }

    #[test]
    fn test_from_lecturer_store_error() {
        assert!(matches!(AppError::from(LecturerStoreError::DuplicateKey("E11000".into())), AppError::Conflict(_)));
        assert!(matches!(
            AppError::from(LecturerStoreError::Unavailable("no server".into())),
            AppError::ServiceUnavailable(_)
        ));
        assert!(matches!(AppError::from(LecturerStoreError::Other("x".into())), AppError::Database(_)));
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err: AppError = StoreError::from(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_option_ext() {
        let some_value: Option<i32> = Some(42);
        let result: AppResult<i32> = some_value.ok_or_not_found("missing");
        assert_eq!(result.unwrap(), 42);

        let none_value: Option<i32> = None;
        match none_value.ok_or_not_found("No such module with id = M1") {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No such module with id = M1"),
            _ => panic!("Expected NotFound variant"),
        }
    }
}
