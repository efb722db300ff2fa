//! Debounced draft autosave
//!
//! Every edit reschedules a pending write; the draft only reaches the store
//! once edits have been quiet for the debounce window.
//!
//! Writes are serialized through a generation counter. A scheduled write
//! takes the generation lock after its sleep and only saves if no later
//! `schedule`, `cancel`, `flush` or `discard` has bumped the generation.
//! Those calls take the same lock, so they wait for a write already in
//! progress instead of racing it.

use super::error::DraftError;
use super::store::{DraftSnapshot, DraftStore};
use crate::config::BuilderConfig;
use crate::models::PageDraft;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Schedules debounced writes of the page draft
pub struct DraftAutosaver {
    store: Arc<dyn DraftStore>,
    debounce: Duration,
    generation: Arc<Mutex<u64>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DraftAutosaver {
    pub fn new(store: Arc<dyn DraftStore>, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            generation: Arc::new(Mutex::new(0)),
            pending: Mutex::new(None),
        }
    }

    pub fn from_config(store: Arc<dyn DraftStore>, config: &BuilderConfig) -> Self {
        Self::new(store, Duration::from_millis(config.autosave_debounce_ms))
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Replace any pending write with one of `page` after the debounce window
    pub async fn schedule(&self, page: PageDraft) {
        let mut pending = self.pending.lock().await;
        let scheduled = {
            let mut generation = self.generation.lock().await;
            *generation += 1;
            *generation
        };

        if pending.take().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!("Superseding pending draft autosave");
        }

        let store = Arc::clone(&self.store);
        let generation = Arc::clone(&self.generation);
        let debounce = self.debounce;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let current = generation.lock().await;
            if *current != scheduled {
                return;
            }
            if let Err(e) = store.save(&page).await {
                tracing::warn!("Failed to autosave page draft: {}", e);
            }
        }));
    }

    /// Cancel any pending write and save `page` immediately
    pub async fn flush(&self, page: &PageDraft) -> Result<DraftSnapshot, DraftError> {
        let (_, _generation) = self.supersede().await;
        self.store.save(page).await
    }

    /// Drop the pending write, if any; returns whether one was cancelled
    pub async fn cancel(&self) -> bool {
        let (cancelled, _generation) = self.supersede().await;
        cancelled
    }

    /// Whether a scheduled write has not completed yet
    pub async fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel pending writes and remove the stored draft
    ///
    /// Called once the page has been created on the server.
    pub async fn discard(&self) -> Result<bool, DraftError> {
        let (_, _generation) = self.supersede().await;
        self.store.clear().await
    }

    /// Invalidate every scheduled write and hold the generation lock
    ///
    /// Waits for a write already in progress to finish.
    async fn supersede(&self) -> (bool, MutexGuard<'_, u64>) {
        let cancelled = self
            .pending
            .lock()
            .await
            .take()
            .is_some_and(|handle| !handle.is_finished());

        let mut generation = self.generation.lock().await;
        *generation += 1;
        (cancelled, generation)
    }
}

impl Drop for DraftAutosaver {
    fn drop(&mut self) {
        // A write holding the lock is already saving the latest draft
        if let Ok(mut generation) = self.generation.try_lock() {
            *generation += 1;
        }
    }
}
