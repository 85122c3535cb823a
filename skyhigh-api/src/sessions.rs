use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use skyhigh_core::{CabinClass, SearchIntent};
use skyhigh_offer::{FlightOffer, SearchSession, SearchState};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use uuid::Uuid;

use crate::error::AppError;
use crate::leads::LeadView;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Fields of the flight search form. Blank or missing fields are accepted
/// here and reported by validation.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub depart_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default = "default_passengers")]
    pub passengers: u32,
    #[serde(default)]
    pub cabin_class: CabinClass,
}

fn default_passengers() -> u32 {
    1
}

impl From<SearchRequest> for SearchIntent {
    fn from(req: SearchRequest) -> Self {
        SearchIntent::new(req.origin, req.destination, req.depart_date, req.passengers, req.cabin_class)
            .with_return_date(req.return_date)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchAccepted {
    pub session_id: Uuid,
    pub sequence: u64,
    pub status: &'static str,
    pub retry_after_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub status: &'static str,
}

/// One result card.
#[derive(Debug, Serialize)]
pub struct OfferCard {
    pub id: String,
    pub carrier: String,
    pub cabin_class: CabinClass,
    pub cabin_label: &'static str,
    pub departure_time: String,
    pub arrival_time: String,
    pub origin: String,
    pub destination: String,
    pub duration: String,
    pub stops: u8,
    pub stop_label: String,
    /// Per passenger
    pub price: u32,
}

impl From<&FlightOffer> for OfferCard {
    fn from(offer: &FlightOffer) -> Self {
        Self {
            id: offer.id.clone(),
            carrier: offer.carrier.clone(),
            cabin_class: offer.cabin_class,
            cabin_label: offer.cabin_class.label(),
            departure_time: offer.departure_time.format("%H:%M").to_string(),
            arrival_time: offer.arrival_time.format("%H:%M").to_string(),
            origin: offer.origin.clone(),
            destination: offer.destination.clone(),
            duration: offer.duration.to_string(),
            stops: offer.stops,
            stop_label: offer.stop_label(),
            price: offer.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchSummary {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    pub cabin_class: CabinClass,
}

impl From<&SearchIntent> for SearchSummary {
    fn from(intent: &SearchIntent) -> Self {
        Self {
            origin: intent.origin().map(str::to_string),
            destination: intent.destination().map(str::to_string),
            depart_date: intent.depart_date(),
            return_date: intent.return_date(),
            passengers: intent.passengers(),
            cabin_class: intent.cabin_class(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub status: &'static str,
    pub sequence: Option<u64>,
    pub search: Option<SearchSummary>,
    pub headline: Option<String>,
    pub message: Option<String>,
    pub offers: Vec<OfferCard>,
    pub last_error: Option<String>,
    pub lead: Option<LeadView>,
}

/// "3 flights found from JFK to LHR on June 1, 2025 for 2 passengers"
fn results_message(intent: &SearchIntent, count: usize) -> String {
    let date = intent
        .depart_date()
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_default();
    let passengers = intent.passengers();
    format!(
        "{} flights found from {} to {} on {} for {} passenger{}",
        count,
        intent.origin().unwrap_or_default(),
        intent.destination().unwrap_or_default(),
        date,
        passengers,
        if passengers > 1 { "s" } else { "" }
    )
}

impl SessionView {
    pub fn build(session_id: Uuid, session: &SearchSession) -> Self {
        let mut view = Self {
            session_id,
            status: "idle",
            sequence: None,
            search: None,
            headline: None,
            message: None,
            offers: Vec::new(),
            last_error: session.last_error().map(|e| e.to_string()),
            lead: session.lead().map(LeadView::from),
        };

        match session.state() {
            SearchState::Idle => {}
            SearchState::Loading { sequence, intent } => {
                view.status = "loading";
                view.sequence = Some(*sequence);
                view.search = Some(intent.into());
                view.message = Some("Searching for the best premium flights...".to_string());
            }
            SearchState::Ready { sequence, intent, offers } => {
                view.status = "ready";
                view.sequence = Some(*sequence);
                view.search = Some(intent.into());
                if offers.is_empty() {
                    view.message = Some("Complete your search to see available flights".to_string());
                } else {
                    view.headline = Some(format!("Available {} Flights", intent.cabin_class().label()));
                    view.message = Some(results_message(intent, offers.len()));
                }
                view.offers = offers.iter().map(OfferCard::from).collect();
            }
        }
        view
    }
}

fn retry_after_ms(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/{id}", get(get_session))
        .route("/v1/sessions/{id}/search", post(submit_search))
        .route("/v1/sessions/{id}/events", get(session_events))
}

/// POST /v1/sessions
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let (session_id, _) = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(SessionCreated {
            session_id,
            status: "idle",
        }),
    )
}

/// GET /v1/sessions/:id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let guard = session.lock().await;
    Ok(Json(SessionView::build(session_id, &guard)))
}

/// POST /v1/sessions/:id/search
/// Accept a search; offers follow after the artificial latency
pub async fn submit_search(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SearchRequest>,
) -> Result<(StatusCode, Json<SearchAccepted>), AppError> {
    let session = state.sessions.get(session_id).await?;
    let pending = state.runner.submit(session_id, session, req.into()).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SearchAccepted {
            session_id,
            sequence: pending.ticket.sequence(),
            status: "loading",
            retry_after_ms: retry_after_ms(state.runner.delay()),
        }),
    ))
}

/// GET /v1/sessions/:id/events
/// Server-sent events for this session's search completions and leads
pub async fn session_events(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    state.sessions.get(session_id).await?;
    let rx = state.events_tx.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result| async move {
        match result {
            Ok(event) if event.session_id() == session_id => Event::default()
                .event(event.name())
                .json_data(&event)
                .ok()
                .map(Ok),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(%session_id, error = %e, "SSE subscriber lagged");
                None
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_defaults() {
        let json = r#"{ "origin": "jfk", "destination": "LHR", "depart_date": "2025-06-01" }"#;
        let req: SearchRequest = serde_json::from_str(json).expect("Failed to deserialize");
        let intent: SearchIntent = req.into();
        assert_eq!(intent.origin(), Some("JFK"));
        assert_eq!(intent.passengers(), 1);
        assert_eq!(intent.cabin_class(), CabinClass::Business);
        assert!(intent.return_date().is_none());
    }

    #[test]
    fn test_retry_after_saturates() {
        assert_eq!(retry_after_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(retry_after_ms(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_results_message() {
        let intent = SearchIntent::new(
            Some("JFK".into()),
            Some("LHR".into()),
            NaiveDate::from_ymd_opt(2025, 6, 1),
            1,
            CabinClass::First,
        );
        assert_eq!(
            results_message(&intent, 5),
            "5 flights found from JFK to LHR on June 1, 2025 for 1 passenger"
        );
    }
}
