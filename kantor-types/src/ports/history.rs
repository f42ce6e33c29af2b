//! History store port.
//!
//! Adapters (JSON file, in-memory) implement this trait. Opening is the
//! adapter's constructor; the service only reads, writes and closes.

use crate::domain::History;
use crate::error::RepoError;

/// Persistence for the calculator history.
///
/// `write` replaces the whole record. Callers that read, modify and write
/// back are responsible for serializing those cycles.
#[async_trait::async_trait]
pub trait HistoryStore: Send + Sync + 'static {
    /// Loads the current history.
    async fn read(&self) -> Result<History, RepoError>;

    /// Overwrites the stored history with `history`.
    async fn write(&self, history: &History) -> Result<(), RepoError>;

    /// Flushes and releases any held resources.
    async fn close(&self) -> Result<(), RepoError> {
        Ok(())
    }
}
