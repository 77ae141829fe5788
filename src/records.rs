//! Data access for the relational college store.
//!
//! Thin async wrappers over the SQLite pool. Every statement is parameterized; callers
//! decide how an empty result or a constraint violation is shown to the user.

use sqlx::SqlitePool;

use crate::types::{Department, Module, Student};

/// Failures of the relational store, classified by what the user should be told.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("foreign key constraint failed: {0}")]
    ForeignKey(String),
    #[error("duplicate entry: {0}")]
    Duplicate(String),
    #[error("check constraint failed: {0}")]
    Check(String),
    #[error("database unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Other(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();
                if db_err.is_foreign_key_violation() {
                    StoreError::ForeignKey(msg)
                } else if db_err.is_unique_violation() {
                    StoreError::Duplicate(msg)
                } else if db_err.is_check_violation() {
                    StoreError::Check(msg)
                } else {
                    StoreError::Other(msg)
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Other(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub async fn retrieve_students(pool: &SqlitePool) -> StoreResult<Vec<Student>> {
    let rows = sqlx::query_as::<_, Student>("SELECT sid, name, gpa FROM student ORDER BY sid")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn retrieve_modules(pool: &SqlitePool) -> StoreResult<Vec<Module>> {
    let rows = sqlx::query_as::<_, Module>("SELECT mid, name, credits, dept FROM module ORDER BY mid")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn retrieve_module(pool: &SqlitePool, mid: &str) -> StoreResult<Option<Module>> {
    let row = sqlx::query_as::<_, Module>("SELECT mid, name, credits, dept FROM module WHERE mid = ?1")
        .bind(mid)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Updates name and credits of a module; returns the number of rows touched.
pub async fn update_module(pool: &SqlitePool, mid: &str, name: &str, credits: i64) -> StoreResult<u64> {
    let res = sqlx::query("UPDATE module SET name = ?1, credits = ?2 WHERE mid = ?3")
        .bind(name)
        .bind(credits)
        .bind(mid)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

/// Students enrolled on a module.
pub async fn studying_module(pool: &SqlitePool, mid: &str) -> StoreResult<Vec<Student>> {
    let rows = sqlx::query_as::<_, Student>(
        r#"SELECT s.sid, s.name, s.gpa
           FROM student s
           INNER JOIN student_module sm ON s.sid = sm.sid
           WHERE sm.mid = ?1
           ORDER BY s.sid"#,
    )
    .bind(mid)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn add_student(pool: &SqlitePool, student: &Student) -> StoreResult<()> {
    sqlx::query("INSERT INTO student (sid, name, gpa) VALUES (?1, ?2, ?3)")
        .bind(&student.sid)
        .bind(&student.name)
        .bind(student.gpa)
        .execute(pool)
        .await?;
    Ok(())
}

/// Deletes a student; returns the number of rows removed. Fails with
/// [`StoreError::ForeignKey`] while the student is still enrolled on a module.
pub async fn delete_student(pool: &SqlitePool, sid: &str) -> StoreResult<u64> {
    let res = sqlx::query("DELETE FROM student WHERE sid = ?1").bind(sid).execute(pool).await?;
    Ok(res.rows_affected())
}

pub async fn retrieve_department(pool: &SqlitePool, did: &str) -> StoreResult<Option<Department>> {
    let row = sqlx::query_as::<_, Department>("SELECT did, name FROM dept WHERE did = ?1")
        .bind(did)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}
