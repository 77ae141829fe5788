#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::db;
    use crate::records::{self, StoreError};
    use crate::tests::support::setup_test_db;
    use crate::types::{LecturerForm, Student};
    use crate::validation::validate_lecturer;

    #[tokio::test]
    async fn test_init_db_creates_tables() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let tables: Vec<String> =
            sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
                .fetch_all(&pool)
                .await
                .unwrap();

        for table in ["dept", "module", "student", "student_module"] {
            assert!(tables.contains(&table.to_string()), "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_init_and_seed_are_idempotent() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        db::init_db(&pool).await.unwrap();
        assert!(!db::seed_demo_data(&pool).await.unwrap());

        let students = records::retrieve_students(&pool).await.unwrap();
        assert_eq!(students.len(), 5);
    }

    #[tokio::test]
    async fn test_retrieve_students_sorted() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let sids: Vec<String> = records::retrieve_students(&pool).await.unwrap().into_iter().map(|s| s.sid).collect();
        let mut sorted = sids.clone();
        sorted.sort();
        assert_eq!(sids, sorted);
    }

    #[tokio::test]
    async fn test_retrieve_module_and_department() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let module = records::retrieve_module(&pool, "HS301").await.unwrap().unwrap();
        assert_eq!(module.name, "Irish History");
        assert_eq!(module.credits, 15);
        assert!(records::retrieve_module(&pool, "NOPE").await.unwrap().is_none());

        let dept = records::retrieve_department(&pool, "SFT").await.unwrap().unwrap();
        assert_eq!(dept.name, "Software");
        assert!(records::retrieve_department(&pool, "XYZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_module_reports_rows() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        assert_eq!(records::update_module(&pool, "LF104", "Leaving Cert German", 10).await.unwrap(), 1);
        assert_eq!(records::update_module(&pool, "XX999", "Nothing Here", 10).await.unwrap(), 0);

        let module = records::retrieve_module(&pool, "LF104").await.unwrap().unwrap();
        assert_eq!(module.name, "Leaving Cert German");
        assert_eq!(module.credits, 10);
    }

    #[tokio::test]
    async fn test_studying_module_join() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let students = records::studying_module(&pool, "DB101").await.unwrap();
        let sids: Vec<&str> = students.iter().map(|s| s.sid.as_str()).collect();
        assert_eq!(sids, vec!["G001", "G002"]);

        assert!(records::studying_module(&pool, "EE101").await.unwrap().is_empty());
        assert!(records::studying_module(&pool, "NOPE").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_delete_student() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let student = Student { sid: "G050".into(), name: "Eoin Daly".into(), gpa: 2.25 };
        records::add_student(&pool, &student).await.unwrap();

        let err = records::add_student(&pool, &student).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        assert_eq!(records::delete_student(&pool, "G050").await.unwrap(), 1);
        assert_eq!(records::delete_student(&pool, "G050").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_enrolled_student_violates_foreign_key() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let err = records::delete_student(&pool, "G003").await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey(_)), "unexpected error: {:?}", err);
    }

    #[tokio::test]
    async fn test_student_constraints() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let long_id = Student { sid: "G0001".into(), name: "Too Long".into(), gpa: 1.0 };
        let err = records::add_student(&pool, &long_id).await.unwrap_err();
        assert!(matches!(err, StoreError::Check(_)));

        let bad_gpa = Student { sid: "G099".into(), name: "Bad Grade".into(), gpa: 4.5 };
        assert!(matches!(records::add_student(&pool, &bad_gpa).await.unwrap_err(), StoreError::Check(_)));
    }

    #[tokio::test]
    async fn test_keys_ignore_case() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;

        let dept = records::retrieve_department(&pool, "sft").await.unwrap().unwrap();
        assert_eq!(dept.did, "SFT");

        let student = Student { sid: "g005".into(), name: "Pat Kenny".into(), gpa: 1.9 };
        let err = records::add_student(&pool, &student).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));

        assert_eq!(records::delete_student(&pool, "g005").await.unwrap(), 1);
    }

    #[test]
    fn test_demo_departments_accept_lecturers() {
        let sample = LecturerForm { id: "L001".into(), name: "Mary Ryan".into(), ..Default::default() };
        for &(did, _) in db::DEMO_DEPTS {
            let form = LecturerForm { dept: did.to_string(), ..sample.clone() };
            assert!(validate_lecturer(&form).is_empty(), "dept {} fails lecturer rules", did);
        }
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let pool = setup_test_db(&dir).await;
        pool.close().await;

        let err = records::retrieve_modules(&pool).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
