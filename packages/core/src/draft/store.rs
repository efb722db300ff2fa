//! Draft storage backends
//!
//! The page builder keeps one local draft of a page that has never been saved
//! to the server. The draft is a convenience copy: the server record is
//! authoritative, and a draft is cleared once the page is created.

use super::error::DraftError;
use crate::config::BuilderConfig;
use crate::models::PageDraft;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// A stored draft and when it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub saved_at: DateTime<Utc>,
    pub page: PageDraft,
}

impl DraftSnapshot {
    pub fn new(page: PageDraft) -> Self {
        Self {
            saved_at: Utc::now(),
            page,
        }
    }
}

/// Storage for the single page-builder draft slot
///
/// Implementations must be `Send + Sync` so the autosaver can write from a
/// spawned task.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Replace the stored draft
    async fn save(&self, page: &PageDraft) -> Result<DraftSnapshot, DraftError>;

    /// Stored draft, if any
    async fn load(&self) -> Result<Option<DraftSnapshot>, DraftError>;

    /// Remove the stored draft; returns whether one existed
    async fn clear(&self) -> Result<bool, DraftError>;

    /// Whether a draft is waiting to be resumed
    async fn has_draft(&self) -> Result<bool, DraftError> {
        Ok(self.load().await?.is_some())
    }
}

/// Draft kept in a JSON file
///
/// Clones share one write lock, so saves and clears through any clone never
/// interleave on the temp file.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileDraftStore {
    /// Store the draft at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store the draft where the configuration says
    pub fn from_config(config: &BuilderConfig) -> Result<Self, DraftError> {
        config.validate().map_err(DraftError::invalid_config)?;
        let dir = config
            .resolve_draft_dir()
            .map_err(|e| DraftError::DirectoryUnavailable(e.to_string()))?;
        Ok(Self::new(dir.join(config.draft_file_name())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    /// Uses atomic write pattern (write-to-temp, then rename) so a crash
    /// mid-write never leaves a truncated draft behind.
    async fn save(&self, page: &PageDraft) -> Result<DraftSnapshot, DraftError> {
        let _write = self.write_lock.lock().await;

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| DraftError::io(dir, e))?;
        }

        let snapshot = DraftSnapshot::new(page.clone());
        let serialized = serde_json::to_string_pretty(&snapshot)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, serialized)
            .await
            .map_err(|e| DraftError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| DraftError::io(&self.path, e))?;

        tracing::debug!("Saved page draft to {}", self.path.display());
        Ok(snapshot)
    }

    async fn load(&self) -> Result<Option<DraftSnapshot>, DraftError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DraftError::io(&self.path, e)),
        };

        let snapshot: DraftSnapshot = serde_json::from_str(&contents)?;
        tracing::debug!(
            "Loaded page draft saved at {} from {}",
            snapshot.saved_at,
            self.path.display()
        );
        Ok(Some(snapshot))
    }

    async fn clear(&self) -> Result<bool, DraftError> {
        let _write = self.write_lock.lock().await;

        match fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("Cleared page draft at {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DraftError::io(&self.path, e)),
        }
    }
}

/// Draft kept in memory, for tests and embedding without a filesystem
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slot: Mutex<Option<DraftSnapshot>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn save(&self, page: &PageDraft) -> Result<DraftSnapshot, DraftError> {
        let snapshot = DraftSnapshot::new(page.clone());
        *self.slot.lock().await = Some(snapshot.clone());
        Ok(snapshot)
    }

    async fn load(&self) -> Result<Option<DraftSnapshot>, DraftError> {
        Ok(self.slot.lock().await.clone())
    }

    async fn clear(&self) -> Result<bool, DraftError> {
        Ok(self.slot.lock().await.take().is_some())
    }
}
