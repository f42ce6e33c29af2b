//! JSON file history store.
//!
//! The whole history lives in one pretty-printed JSON document,
//! `{"history": [...]}`, which is overwritten on every write.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::{debug, warn};

use kantor_types::{History, HistoryStore, RepoError};

// ─────────────────────────────────────────────────────────────────────────────
// JSON File Store
// ─────────────────────────────────────────────────────────────────────────────

/// History store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    closed: AtomicBool,
}

impl JsonFileStore {
    /// Opens the store at `path`, creating the file (and its parent
    /// directory) with an empty history if it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        if !tokio::fs::try_exists(&path).await? {
            debug!("Creating history file at {}", path.display());
            let empty = serde_json::to_vec(&History::new())?;
            tokio::fs::write(&path, empty).await?;
        }

        Ok(Self {
            path,
            closed: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_open(&self) -> Result<(), RepoError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(RepoError::Io(format!(
                "history store {} is closed",
                self.path.display()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonFileStore {
    async fn read(&self) -> Result<History, RepoError> {
        self.ensure_open()?;

        let raw = tokio::fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Ok(History::new());
        }

        // A corrupt file reads as an empty history; the next write replaces it.
        match serde_json::from_str(&raw) {
            Ok(history) => Ok(history),
            Err(e) => {
                warn!(
                    "Unreadable history file {}: {}. Starting from an empty history",
                    self.path.display(),
                    e
                );
                Ok(History::new())
            }
        }
    }

    async fn write(&self, history: &History) -> Result<(), RepoError> {
        self.ensure_open()?;

        let body = serde_json::to_vec_pretty(history)?;
        tokio::fs::write(&self.path, body).await?;
        debug!(
            "Wrote {} history entries to {}",
            history.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn close(&self) -> Result<(), RepoError> {
        self.closed.store(true, Ordering::Release);
        debug!("Closed history store {}", self.path.display());
        Ok(())
    }
}
