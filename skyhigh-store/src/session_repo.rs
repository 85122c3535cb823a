use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use skyhigh_offer::{SearchSession, SharedSession};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),
}

/// Repository trait for browsing sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Start a fresh session in the `Idle` state.
    async fn create(&self) -> (Uuid, SharedSession);

    /// Fetch a session and mark it as recently used.
    async fn get(&self, id: Uuid) -> Result<SharedSession, StoreError>;

    async fn remove(&self, id: Uuid) -> bool;

    /// Drop sessions unused for longer than `idle_for`. Returns how many went.
    async fn evict_idle(&self, idle_for: Duration) -> usize;

    async fn len(&self) -> usize;
}

struct SessionEntry {
    session: SharedSession,
    last_seen: Instant,
}

/// Process-local session storage. Nothing survives a restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn create(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(SearchSession::new()));
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        debug!(session_id = %id, "Session created");
        (id, session)
    }

    async fn get(&self, id: Uuid) -> Result<SharedSession, StoreError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(StoreError::SessionNotFound(id))?;
        entry.last_seen = Instant::now();
        Ok(entry.session.clone())
    }

    async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    async fn evict_idle(&self, idle_for: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let initial_count = sessions.len();

        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= idle_for);

        initial_count - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Periodically evict idle sessions until the task is aborted.
pub fn spawn_idle_sweeper(
    repo: Arc<dyn SessionRepository>,
    idle_for: Duration,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = repo.evict_idle(idle_for).await;
            if removed > 0 {
                let remaining = repo.len().await;
                info!(removed, remaining, "Evicted idle sessions");
            }
        }
    })
}
