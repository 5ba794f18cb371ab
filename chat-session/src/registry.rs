use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::session::Session;

/// Sessions untouched for this long are dropped by [`SessionRegistry::expire_idle`].
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(60 * 60);

/// Shared handle to one session. Holding the lock across a query keeps one
/// question in flight per session.
pub type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// Live sessions keyed by id.
///
/// Browsers that vanish without closing their session leave it behind, so
/// idle entries are swept on every `create` and by [`expire_idle`](Self::expire_idle).
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    pub fn idle_ttl(&self) -> Duration {
        self.idle_ttl
    }

    pub async fn create(&self) -> Uuid {
        let session = Session::new();
        let id = session.id();
        let mut map = self.sessions.write().await;
        let expired = sweep(&mut map, self.idle_ttl, Instant::now());
        map.insert(
            id,
            Entry {
                session: Arc::new(Mutex::new(session)),
                last_seen: Instant::now(),
            },
        );
        info!(session = %id, live = map.len(), expired, "session created");
        id
    }

    /// Returns the session and marks it as seen.
    pub async fn get(&self, id: Uuid) -> Option<SharedSession> {
        let mut map = self.sessions.write().await;
        let entry = map.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(entry.session.clone())
    }

    /// Removes the session. `false` if it did not exist.
    pub async fn close(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session = %id, "session closed");
        }
        removed
    }

    /// Drops sessions idle longer than the TTL. Sessions with a handle still
    /// held elsewhere are kept. Returns how many were dropped.
    pub async fn expire_idle(&self) -> usize {
        let mut map = self.sessions.write().await;
        let expired = sweep(&mut map, self.idle_ttl, Instant::now());
        if expired > 0 {
            info!(expired, live = map.len(), "idle sessions expired");
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

fn sweep(map: &mut HashMap<Uuid, Entry>, ttl: Duration, now: Instant) -> usize {
    let before = map.len();
    map.retain(|id, entry| {
        let idle = now.saturating_duration_since(entry.last_seen) > ttl;
        // A handle outside the map means a request is still using it.
        let keep = !idle || Arc::strong_count(&entry.session) > 1;
        if !keep {
            debug!(session = %id, "dropping idle session");
        }
        keep
    });
    before - map.len()
}
