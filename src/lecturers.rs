//! Document store for lecturers.
//!
//! Lecturers live in a document collection keyed by `_id`. MongoDB is the primary backend;
//! [`SqliteLecturers`] keeps the same documents as JSON rows for single-file deployments
//! and for tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::ClientOptions,
    Client, Collection,
};
use sqlx::SqlitePool;

use crate::config::LecturersConfig;
use crate::types::Lecturer;

/// MongoDB's duplicate key error code.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, thiserror::Error)]
pub enum LecturerStoreError {
    #[error("_id already exists: {0}")]
    DuplicateKey(String),
    #[error("lecturer store unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Other(String),
}

pub type LecturerResult<T> = Result<T, LecturerStoreError>;

#[async_trait]
pub trait LecturerStore: Send + Sync {
    /// All lecturer documents, sorted by `_id` ascending.
    async fn retrieve_lecturers(&self) -> LecturerResult<Vec<Lecturer>>;
    /// Inserts one document. A second document with the same `_id` yields
    /// [`LecturerStoreError::DuplicateKey`].
    async fn add_lecturer(&self, lecturer: &Lecturer) -> LecturerResult<()>;
    async fn ping(&self) -> LecturerResult<()>;
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

pub type SharedLecturerStore = Arc<dyn LecturerStore>;

/// Picks a backend from the URL scheme.
pub async fn connect(cfg: &LecturersConfig) -> anyhow::Result<SharedLecturerStore> {
    if cfg.url.starts_with("sqlite:") {
        crate::config::ensure_sqlite_parent_dir(&cfg.url)?;
        let pool = crate::db::connect(&cfg.url, 2).await?;
        let store = SqliteLecturers::new(pool);
        store.init().await?;
        Ok(Arc::new(store))
    } else if cfg.url.starts_with("mongodb://") || cfg.url.starts_with("mongodb+srv://") {
        let store = MongoLecturers::connect(cfg).await?;
        Ok(Arc::new(store))
    } else {
        Err(anyhow::anyhow!("unsupported lecturers.url scheme: {}", cfg.url))
    }
}

pub struct MongoLecturers {
    client: Client,
    collection: Collection<Lecturer>,
}

impl MongoLecturers {
    /// Builds the client. No connection is made until the first operation, so the server can
    /// start while MongoDB is down.
    pub async fn connect(cfg: &LecturersConfig) -> anyhow::Result<Self> {
        let options = client_options(&cfg.url, cfg.server_selection_timeout_secs).await?;
        let client = Client::with_options(options)?;
        let collection = client.database(&cfg.database).collection::<Lecturer>(&cfg.collection);
        Ok(Self { client, collection })
    }
}

/// Client options for `url`, giving up on server selection after `timeout_secs` so lecturer pages
/// fail fast while MongoDB is down.
pub async fn client_options(url: &str, timeout_secs: u64) -> anyhow::Result<ClientOptions> {
    let mut options = ClientOptions::parse(url).await?;
    options.server_selection_timeout = Some(Duration::from_secs(timeout_secs));
    options.connect_timeout = Some(Duration::from_secs(timeout_secs));
    Ok(options)
}

fn classify_mongo(err: mongodb::error::Error) -> LecturerStoreError {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE => {
            LecturerStoreError::DuplicateKey(we.message.clone())
        }
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            LecturerStoreError::Unavailable(err.to_string())
        }
        _ => LecturerStoreError::Other(err.to_string()),
    }
}

#[async_trait]
impl LecturerStore for MongoLecturers {
    async fn retrieve_lecturers(&self) -> LecturerResult<Vec<Lecturer>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await.map_err(classify_mongo)?;
        cursor.try_collect::<Vec<Lecturer>>().await.map_err(classify_mongo)
    }

    async fn add_lecturer(&self, lecturer: &Lecturer) -> LecturerResult<()> {
        self.collection.insert_one(lecturer).await.map_err(classify_mongo)?;
        Ok(())
    }

    async fn ping(&self) -> LecturerResult<()> {
        self.client.database("admin").run_command(doc! { "ping": 1 }).await.map_err(classify_mongo)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}

/// Lecturer documents stored as JSON text, keyed by `_id`.
#[derive(Clone)]
pub struct SqliteLecturers {
    pool: SqlitePool,
}

impl SqliteLecturers {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS lecturers (
                _id TEXT PRIMARY KEY,
                doc TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn classify_sqlx(err: sqlx::Error) -> LecturerStoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            LecturerStoreError::DuplicateKey(db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            LecturerStoreError::Unavailable(err.to_string())
        }
        other => LecturerStoreError::Other(other.to_string()),
    }
}

#[async_trait]
impl LecturerStore for SqliteLecturers {
    async fn retrieve_lecturers(&self) -> LecturerResult<Vec<Lecturer>> {
        let docs: Vec<String> = sqlx::query_scalar("SELECT doc FROM lecturers ORDER BY _id")
            .fetch_all(&self.pool)
            .await
            .map_err(classify_sqlx)?;
        docs.iter()
            .map(|d| {
                serde_json::from_str::<Lecturer>(d)
                    .map_err(|e| LecturerStoreError::Other(format!("corrupt lecturer document: {}", e)))
            })
            .collect()
    }

    async fn add_lecturer(&self, lecturer: &Lecturer) -> LecturerResult<()> {
        let doc = serde_json::to_string(lecturer).map_err(|e| LecturerStoreError::Other(e.to_string()))?;
        sqlx::query("INSERT INTO lecturers (_id, doc) VALUES (?1, ?2)")
            .bind(&lecturer.id)
            .bind(doc)
            .execute(&self.pool)
            .await
            .map_err(classify_sqlx)?;
        Ok(())
    }

    async fn ping(&self) -> LecturerResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(classify_sqlx)?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
