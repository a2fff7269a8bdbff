/// SQLite implementation of the key/value store
///
/// One `kv` table holds every key. The connection sits behind a mutex so the
/// store can be shared across async tasks; guards are dropped before any
/// await point. Construction failures surface as errors, steady-state
/// reads and writes degrade instead of raising.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, KeyValueStore, StorageError};

/// SQLite-backed key/value store
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database file and run any pending migrations
    pub fn open(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite store initialized at: {:?}", db_path);

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// An in-memory store, handy for tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// A poisoned mutex still wraps a usable connection
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fallible read, used by the degrading trait impl
    pub fn try_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.conn();
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Fallible write; insert-or-replace on the key
    pub fn try_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self.conn();
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Fallible removal; removing an absent key is fine
    pub fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self.conn();
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_string(&self, key: &str) -> Option<String> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to load, treating as absent");
                None
            }
        }
    }

    async fn save_string(&self, key: &str, value: &str) {
        if let Err(e) = self.try_set(key, value) {
            tracing::warn!(key, error = %e, "failed to save, value dropped");
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.try_remove(key) {
            tracing::warn!(key, error = %e, "failed to remove key");
        }
    }
}
