//! # Kantor Repository
//!
//! Concrete history store implementations (adapters) for the calculator.
//! This crate provides the adapters that implement the `HistoryStore` port.

use async_trait::async_trait;
use kantor_types::{History, HistoryStore, RepoError};

pub mod json_file;
pub mod memory;

#[cfg(test)]
mod json_file_tests;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

/// Location value selecting the in-memory store.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Unified store wrapper over the JSON file and in-memory adapters.
#[derive(Debug)]
pub enum Repo {
    File(JsonFileStore),
    Memory(InMemoryStore),
}

/// Build and open a history store from a location string.
///
/// # Examples
///
/// ```ignore
/// // JSON file, created if missing
/// let repo = build_repo("data/history.json").await?;
///
/// // Process memory, lost on restart
/// let repo = build_repo(":memory:").await?;
/// ```
pub async fn build_repo(location: &str) -> anyhow::Result<Repo> {
    Repo::open(location).await
}

impl Repo {
    pub async fn open(location: &str) -> anyhow::Result<Self> {
        if location == MEMORY_LOCATION {
            tracing::info!("Using in-memory history store");
            return Ok(Repo::Memory(InMemoryStore::new()));
        }

        let store = JsonFileStore::open(location).await?;
        tracing::info!("Using history file {}", store.path().display());
        Ok(Repo::File(store))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement HistoryStore for Repo (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl HistoryStore for Repo {
    async fn read(&self) -> Result<History, RepoError> {
        match self {
            Repo::File(store) => store.read().await,
            Repo::Memory(store) => store.read().await,
        }
    }

    async fn write(&self, history: &History) -> Result<(), RepoError> {
        match self {
            Repo::File(store) => store.write(history).await,
            Repo::Memory(store) => store.write(history).await,
        }
    }

    async fn close(&self) -> Result<(), RepoError> {
        match self {
            Repo::File(store) => store.close().await,
            Repo::Memory(store) => store.close().await,
        }
    }
}
