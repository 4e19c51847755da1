//! Pluggable key-value persistence.
//!
//! Values are JSON documents. Two backends exist: a single JSON file for
//! small deployments and an embedded SQLite database in WAL mode.

pub mod json_store;
pub mod sqlite_store;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use json_store::JsonFileStore;
pub use sqlite_store::SqliteStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Returns whether the key existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    async fn health_check(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl StorageBackend {
    pub fn default_path(&self) -> PathBuf {
        match self {
            StorageBackend::Json => PathBuf::from("data/wishlist.json"),
            StorageBackend::Sqlite => PathBuf::from("data/wishlist.db"),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageBackend::Json => "json",
            StorageBackend::Sqlite => "sqlite",
        })
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" | "file" => Ok(StorageBackend::Json),
            "sqlite" | "sql" => Ok(StorageBackend::Sqlite),
            other => Err(format!("unknown storage backend '{}' (expected json or sqlite)", other)),
        }
    }
}

pub async fn open_store(backend: StorageBackend, path: &Path) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match backend {
        StorageBackend::Json => Arc::new(JsonFileStore::open(path).await?),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(path).await?),
    };
    tracing::info!(backend = %backend, path = %path.display(), "Storage ready");
    Ok(store)
}
