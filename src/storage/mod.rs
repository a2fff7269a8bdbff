/// Storage layer for persisting application data
///
/// This module provides the device-local key/value store that everything is
/// persisted through: the serialized drink-log collection under one key and
/// the independent preference scalars under their own keys.

pub mod sqlite;
pub mod migrations;
pub mod logs;

// Re-export the main storage types
pub use sqlite::*;
pub use logs::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur inside the storage backend
///
/// These never reach callers of the [`KeyValueStore`] trait: the trait's
/// operations catch them, log them, and degrade (reads to absent, writes to
/// no-op). They surface only from store construction.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Durable string-keyed storage with typed convenience wrappers
///
/// The raw operations never raise: a failing read reports the key as
/// absent and a failing write is a logged no-op. The typed wrappers encode
/// through strings — booleans as the JSON literals `true`/`false`, numbers
/// as decimal text.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`, absent on missing key or failure
    async fn get_string(&self, key: &str) -> Option<String>;

    /// Unconditionally overwrite the value under `key`; idempotent
    async fn save_string(&self, key: &str, value: &str);

    /// Remove `key` and its value entirely
    async fn remove(&self, key: &str);

    async fn get_boolean(&self, key: &str) -> Option<bool> {
        let raw = self.get_string(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored boolean failed to decode");
                None
            }
        }
    }

    async fn save_boolean(&self, key: &str, value: bool) {
        self.save_string(key, if value { "true" } else { "false" }).await;
    }

    /// Read a number stored as decimal text.
    ///
    /// A present but non-numeric value decodes to NaN rather than an error;
    /// callers treat non-finite as unset. Kept lenient on purpose.
    async fn get_number(&self, key: &str) -> Option<f64> {
        let raw = self.get_string(key).await?;
        Some(raw.trim().parse().unwrap_or(f64::NAN))
    }

    async fn save_number(&self, key: &str, value: f64) {
        self.save_string(key, &value.to_string()).await;
    }
}
