//! In-memory history store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use kantor_types::{History, HistoryStore, RepoError};

/// History store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    history: RwLock<History>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryStore {
    async fn read(&self) -> Result<History, RepoError> {
        Ok(self.history.read().await.clone())
    }

    async fn write(&self, history: &History) -> Result<(), RepoError> {
        *self.history.write().await = history.clone();
        Ok(())
    }
}
