//! Article Store
//!
//! Single-key cache holding the latest validated deck. A `put` replaces the
//! whole value in one statement; readers never observe a partial update.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::RwLock;
use tracing::{debug, info};
use velara_core::ArticleCollection;

/// Logical key the deck is stored under
pub const CACHE_KEY: &str = "velara_daily_news";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Stored deck is corrupt: {0}")]
    Corrupt(String),
    #[error("Store task failed: {0}")]
    Task(String),
    #[error("Failed to acquire lock")]
    LockError,
}

/// Capability the pipeline needs from persistence
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Current deck, `None` before the first successful refresh
    async fn get(&self) -> Result<Option<ArticleCollection>, StoreError>;

    /// Replace the stored deck
    async fn put(&self, collection: &ArticleCollection) -> Result<(), StoreError>;

    /// When the deck was last replaced
    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, StoreError>;
}

/// SQLite-backed store
pub struct SqliteArticleStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteArticleStore {
    /// Open (or create) the store at `db_path`
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open(db_path)?)),
        };
        store.init_db()?;

        info!("Initialized article store at: {}", db_path.display());
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn new_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(Connection::open_in_memory()?)),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockError)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS article_cache (
                key TEXT PRIMARY KEY,
                value JSON NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Run a blocking database call off the async executor
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::LockError)?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl ArticleStore for SqliteArticleStore {
    async fn get(&self) -> Result<Option<ArticleCollection>, StoreError> {
        let value: Option<String> = self
            .with_conn(|conn| {
                Ok(conn
                    .query_row(
                        "SELECT value FROM article_cache WHERE key = ?1",
                        params![CACHE_KEY],
                        |row| row.get(0),
                    )
                    .optional()?)
            })
            .await?;

        value
            .map(|data| {
                serde_json::from_str::<ArticleCollection>(&data)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))
            })
            .transpose()
    }

    async fn put(&self, collection: &ArticleCollection) -> Result<(), StoreError> {
        let data = serde_json::to_string(collection)?;
        let now = Utc::now().timestamp();

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO article_cache (key, value, updated_at)
                 VALUES (?1, ?2, ?3)",
                params![CACHE_KEY, data, now],
            )?;
            Ok(())
        })
        .await?;

        debug!("Stored deck under key: {}", CACHE_KEY);
        Ok(())
    }

    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let timestamp: Option<i64> = self
            .with_conn(|conn| {
                Ok(conn
                    .query_row(
                        "SELECT updated_at FROM article_cache WHERE key = ?1",
                        params![CACHE_KEY],
                        |row| row.get(0),
                    )
                    .optional()?)
            })
            .await?;

        Ok(timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)))
    }
}

/// In-process store, used when no database is wanted and in tests
#[derive(Default)]
pub struct MemoryArticleStore {
    entry: RwLock<Option<(ArticleCollection, DateTime<Utc>)>>,
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn get(&self) -> Result<Option<ArticleCollection>, StoreError> {
        Ok(self.entry.read().await.as_ref().map(|(deck, _)| deck.clone()))
    }

    async fn put(&self, collection: &ArticleCollection) -> Result<(), StoreError> {
        *self.entry.write().await = Some((collection.clone(), Utc::now()));
        Ok(())
    }

    async fn last_updated(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.entry.read().await.as_ref().map(|(_, at)| *at))
    }
}
