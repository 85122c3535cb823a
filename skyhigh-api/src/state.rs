use std::sync::Arc;
use skyhigh_offer::{OfferGenerator, SearchRunner};
use skyhigh_shared::models::events::SessionEvent;
use skyhigh_store::app_config::SearchConfig;
use skyhigh_store::{InMemorySessionStore, SessionRepository};
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionRepository>,
    pub runner: SearchRunner,
    pub events_tx: broadcast::Sender<SessionEvent>,
}

impl AppState {
    /// In-memory state wired from the search settings.
    pub fn from_config(search: &SearchConfig) -> Self {
        // SSE Broadcast Channel
        let (events_tx, _) = broadcast::channel(100);

        let runner = SearchRunner::new(
            Arc::new(OfferGenerator::default()),
            search.delay(),
            search.rng_seed,
            events_tx.clone(),
        );

        Self {
            sessions: Arc::new(InMemorySessionStore::new()),
            runner,
            events_tx,
        }
    }
}
