use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

/// Opens the relational pool. Foreign keys are enforced on every connection.
pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(10));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Foreign keys are critical - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    // Record keys compare case-insensitively
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS dept (
            did TEXT PRIMARY KEY COLLATE NOCASE,
            name TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    // sid mirrors the VARCHAR(4) column of the college schema
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS student (
            sid TEXT PRIMARY KEY COLLATE NOCASE CHECK (length(sid) <= 4),
            name TEXT NOT NULL,
            gpa REAL NOT NULL CHECK (gpa >= 0.0 AND gpa <= 4.0)
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS module (
            mid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            credits INTEGER NOT NULL,
            dept TEXT NOT NULL,
            FOREIGN KEY(dept) REFERENCES dept(did)
        )"#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS student_module (
            sid TEXT NOT NULL,
            mid TEXT NOT NULL,
            PRIMARY KEY (sid, mid),
            FOREIGN KEY(sid) REFERENCES student(sid),
            FOREIGN KEY(mid) REFERENCES module(mid)
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_student_module_mid", "CREATE INDEX IF NOT EXISTS idx_student_module_mid ON student_module(mid)"),
        ("idx_module_dept", "CREATE INDEX IF NOT EXISTS idx_module_dept ON module(dept)"),
    ];
    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            tracing::warn!("Failed to create index {}: {}", name, e);
        }
    }

    Ok(())
}

pub(crate) const DEMO_DEPTS: &[(&str, &str)] = &[
    ("SFT", "Software"),
    ("HIS", "History"),
    ("LAN", "Languages"),
    ("ENG", "Engineering"),
];

const DEMO_MODULES: &[(&str, &str, i64, &str)] = &[
    ("MA101", "Mobile Apps", 5, "SFT"),
    ("DB101", "Databases", 10, "SFT"),
    ("GA201", "Graphics & Animation", 5, "SFT"),
    ("HS301", "Irish History", 15, "HIS"),
    ("LF104", "Leaving Cert French", 5, "LAN"),
    ("EE101", "Electrical Engineering", 10, "ENG"),
];

const DEMO_STUDENTS: &[(&str, &str, f64)] = &[
    ("G001", "Sean Smith", 3.2),
    ("G002", "Sarah Murphy", 3.5),
    ("G003", "Alan Higgins", 2.8),
    ("G004", "Mary Rogers", 3.9),
    ("G005", "Pat Kenny", 1.9),
];

const DEMO_ENROLLMENTS: &[(&str, &str)] = &[
    ("G001", "MA101"),
    ("G001", "DB101"),
    ("G002", "DB101"),
    ("G003", "HS301"),
    ("G004", "GA201"),
];

/// Inserts a small demo college when the student table is empty.
pub async fn seed_demo_data(pool: &SqlitePool) -> anyhow::Result<bool> {
    let students: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM student").fetch_one(pool).await?;
    if students > 0 {
        tracing::debug!("Student table not empty, skipping demo data");
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    for &(did, name) in DEMO_DEPTS {
        sqlx::query("INSERT OR IGNORE INTO dept (did, name) VALUES (?1, ?2)")
            .bind(did)
            .bind(name)
            .execute(&mut *tx)
            .await?;
    }
    for &(mid, name, credits, dept) in DEMO_MODULES {
        sqlx::query("INSERT OR IGNORE INTO module (mid, name, credits, dept) VALUES (?1, ?2, ?3, ?4)")
            .bind(mid)
            .bind(name)
            .bind(credits)
            .bind(dept)
            .execute(&mut *tx)
            .await?;
    }
    for &(sid, name, gpa) in DEMO_STUDENTS {
        sqlx::query("INSERT INTO student (sid, name, gpa) VALUES (?1, ?2, ?3)")
            .bind(sid)
            .bind(name)
            .bind(gpa)
            .execute(&mut *tx)
            .await?;
    }
    for &(sid, mid) in DEMO_ENROLLMENTS {
        sqlx::query("INSERT OR IGNORE INTO student_module (sid, mid) VALUES (?1, ?2)")
            .bind(sid)
            .bind(mid)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(
        "Seeded demo data: {} departments, {} modules, {} students",
        DEMO_DEPTS.len(),
        DEMO_MODULES.len(),
        DEMO_STUDENTS.len()
    );
    Ok(true)
}
