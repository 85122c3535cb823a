use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skyhigh_offer::{ContactDetails, LeadConfirmation, LeadForm};
use skyhigh_shared::models::events::{LeadCapturedEvent, SessionEvent};
use uuid::Uuid;

use crate::error::AppError;
use crate::sessions::OfferCard;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectOfferRequest {
    pub offer_id: String,
}

/// Flight summary and state of the lead form.
#[derive(Debug, Serialize)]
pub struct LeadView {
    pub offer: OfferCard,
    pub passengers: u32,
    pub total_price: u64,
    pub submitted: bool,
    pub confirmation: Option<LeadConfirmation>,
}

impl From<&LeadForm> for LeadView {
    fn from(form: &LeadForm) -> Self {
        Self {
            offer: form.offer().into(),
            passengers: form.passengers(),
            total_price: form.total_price(),
            submitted: form.is_submitted(),
            confirmation: form.confirmation().cloned(),
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions/{id}/selection", post(select_offer).delete(close_selection))
        .route("/v1/sessions/{id}/lead", post(submit_lead))
}

/// POST /v1/sessions/:id/selection
/// Open the lead form for one of the visible offers
pub async fn select_offer(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<SelectOfferRequest>,
) -> Result<Json<LeadView>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.lock().await;
    let form = guard.select(&req.offer_id)?;

    tracing::info!(%session_id, offer_id = %req.offer_id, total_price = form.total_price(), "Offer selected");
    Ok(Json(form.into()))
}

/// DELETE /v1/sessions/:id/selection
/// "Return to search"
pub async fn close_selection(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state.sessions.get(session_id).await?;
    session.lock().await.close_lead();
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/sessions/:id/lead
/// Submit the booking request. Nothing is booked; the form just confirms.
pub async fn submit_lead(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(contact): Json<ContactDetails>,
) -> Result<(StatusCode, Json<LeadConfirmation>), AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.lock().await;
    let confirmation = guard.submit_lead(contact)?.clone();
    let passengers = guard.lead().map(|l| l.passengers()).unwrap_or_default();
    drop(guard);

    // No subscribers is fine
    let _ = state.events_tx.send(SessionEvent::LeadCaptured(LeadCapturedEvent {
        session_id,
        lead_id: confirmation.lead_id,
        offer_id: confirmation.offer_id.clone(),
        passengers,
        total_price: confirmation.total_price,
        timestamp: confirmation.submitted_at.timestamp(),
    }));

    Ok((StatusCode::CREATED, Json(confirmation)))
}
