use std::sync::Arc;
use std::time::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skyhigh_core::{SearchIntent, ValidationError};
use skyhigh_shared::models::events::{SearchCompletedEvent, SessionEvent};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::generator::OfferGenerator;
use crate::session::{SearchSession, SearchTicket};

pub type SharedSession = Arc<Mutex<SearchSession>>;

/// An accepted search whose offers are still being produced.
pub struct PendingSearch {
    pub ticket: SearchTicket,
    /// Resolves to whether the result became visible
    pub task: JoinHandle<bool>,
}

/// Drives searches: accepts a submission, waits the artificial latency,
/// generates offers and publishes them if the submission is still the latest.
#[derive(Clone)]
pub struct SearchRunner {
    generator: Arc<OfferGenerator>,
    delay: Duration,
    seed: Option<u64>,
    events: broadcast::Sender<SessionEvent>,
}

impl SearchRunner {
    pub fn new(
        generator: Arc<OfferGenerator>,
        delay: Duration,
        seed: Option<u64>,
        events: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self { generator, delay, seed, events }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Validate and accept a submission, then generate in the background.
    /// Earlier pending searches are not cancelled; their results are dropped
    /// when they complete.
    pub async fn submit(
        &self,
        session_id: Uuid,
        session: SharedSession,
        intent: SearchIntent,
    ) -> Result<PendingSearch, ValidationError> {
        let ticket = match session.lock().await.submit(intent.clone()) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::warn!(%session_id, error = %e, "Search rejected");
                return Err(e);
            }
        };

        tracing::info!(
            %session_id,
            sequence = ticket.sequence(),
            origin = intent.origin().unwrap_or_default(),
            destination = intent.destination().unwrap_or_default(),
            passengers = intent.passengers(),
            cabin = %intent.cabin_class(),
            "Search submitted"
        );

        let runner = self.clone();
        let task = tokio::spawn(async move { runner.run(session_id, session, intent, ticket).await });

        Ok(PendingSearch { ticket, task })
    }

    async fn run(
        &self,
        session_id: Uuid,
        session: SharedSession,
        intent: SearchIntent,
        ticket: SearchTicket,
    ) -> bool {
        tokio::time::sleep(self.delay).await;

        let offers = self.generator.generate(&intent, &mut self.rng_for(ticket));
        let offer_count = offers.len();

        if !session.lock().await.complete(ticket, offers) {
            return false;
        }

        tracing::info!(%session_id, sequence = ticket.sequence(), offer_count, "Search completed");

        // No subscribers is fine
        let _ = self.events.send(SessionEvent::SearchCompleted(SearchCompletedEvent {
            session_id,
            sequence: ticket.sequence(),
            offer_count,
            timestamp: chrono::Utc::now().timestamp(),
        }));
        true
    }

    fn rng_for(&self, ticket: SearchTicket) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(ticket.sequence())),
            None => StdRng::from_entropy(),
        }
    }
}
