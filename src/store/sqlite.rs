use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use rusqlite_migration::{Migrations, M};

use crate::app::{BeritaError, Result};
use crate::domain::Article;
use crate::store::{HistoryStore, HISTORY_KEY};

pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.lock()?;
        // Another process may hold the write lock briefly.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        migrations.to_latest(&mut conn)?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| BeritaError::Other(format!("History store lock poisoned: {}", e)))
    }

    fn read_history(conn: &Connection) -> Result<Vec<Article>> {
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![HISTORY_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(Self::decode(raw.as_deref()))
    }

    fn decode(raw: Option<&str>) -> Vec<Article> {
        let Some(raw) = raw else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<Article>>(raw) {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!("Ignoring unreadable read history: {}", e);
                Vec::new()
            }
        }
    }

    fn write_history(conn: &Connection, articles: &[Article]) -> Result<()> {
        let value = serde_json::to_string(articles)?;
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![HISTORY_KEY, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Read, change and write the history inside one IMMEDIATE transaction so
    /// a second process cannot interleave its own read-modify-write.
    fn modify<F>(&self, change: F) -> Result<Vec<Article>>
    where
        F: FnOnce(&mut Vec<Article>) -> bool,
    {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut history = Self::read_history(&tx)?;
        if change(&mut history) {
            Self::write_history(&tx, &history)?;
            tx.commit()?;
        }

        Ok(history)
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn load_all(&self) -> Result<Vec<Article>> {
        let conn = self.lock()?;
        Self::read_history(&conn)
    }

    fn append(&self, article: &Article) -> Result<Vec<Article>> {
        self.modify(|history| {
            history.push(article.clone());
            true
        })
    }

    fn remove(&self, index: usize) -> Result<Vec<Article>> {
        self.modify(|history| {
            if index < history.len() {
                history.remove(index);
                true
            } else {
                false
            }
        })
    }
}
