//! Process-wide memoized index handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::{IndexConnector, RetrievalIndex};

/// Lazily constructed, memoized handle to the hosted index.
///
/// - First successful construction is cached for the life of the cell.
/// - Failures are not cached: the next call tries again.
/// - No lock is held across the network call, so concurrent first use may
///   construct more than once; the first stored handle wins and the others are
///   dropped.
pub struct IndexCell {
    connector: Arc<dyn IndexConnector>,
    slot: RwLock<Option<Arc<dyn RetrievalIndex>>>,
    last_error: RwLock<Option<String>>,
    attempts: AtomicU64,
}

impl IndexCell {
    pub fn new(connector: Arc<dyn IndexConnector>) -> Self {
        Self {
            connector,
            slot: RwLock::new(None),
            last_error: RwLock::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    /// Returns the cached handle, constructing it on first use.
    ///
    /// `None` means construction failed; the diagnostic is logged and kept for
    /// [`IndexCell::last_error`].
    pub async fn get_index(&self) -> Option<Arc<dyn RetrievalIndex>> {
        if let Some(handle) = self.cached().await {
            return Some(handle);
        }

        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(attempt, "constructing index handle");

        match self.connector.connect().await {
            Ok(handle) => {
                let mut slot = self.slot.write().await;
                if let Some(existing) = slot.as_ref() {
                    debug!("index handle built concurrently, keeping the first one");
                    return Some(Arc::clone(existing));
                }
                *slot = Some(Arc::clone(&handle));
                drop(slot);
                *self.last_error.write().await = None;
                info!(index = %handle.name(), attempt, "index handle ready");
                Some(handle)
            }
            Err(err) => {
                error!(error = %err, attempt, "index initialization failed");
                *self.last_error.write().await = Some(err.to_string());
                None
            }
        }
    }

    /// Cached handle without attempting construction.
    pub async fn cached(&self) -> Option<Arc<dyn RetrievalIndex>> {
        self.slot.read().await.clone()
    }

    /// `true` once a handle has been constructed.
    pub async fn is_ready(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Message of the most recent failed construction, cleared on success.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Number of construction attempts so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Drops the cached handle; the next [`IndexCell::get_index`] reconnects.
    pub async fn reset(&self) {
        *self.slot.write().await = None;
        *self.last_error.write().await = None;
    }
}
