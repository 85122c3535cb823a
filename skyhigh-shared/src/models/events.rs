use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A search finished and its offers are now the visible result set of the session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchCompletedEvent {
    pub session_id: Uuid,
    pub sequence: u64,
    pub offer_count: usize,
    pub timestamp: i64,
}

/// A visitor submitted the lead form for a selected offer.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LeadCapturedEvent {
    pub session_id: Uuid,
    pub lead_id: Uuid,
    pub offer_id: String,
    pub passengers: u32,
    pub total_price: u64,
    pub timestamp: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    SearchCompleted(SearchCompletedEvent),
    LeadCaptured(LeadCapturedEvent),
}

impl SessionEvent {
    pub fn session_id(&self) -> Uuid {
        match self {
            SessionEvent::SearchCompleted(e) => e.session_id,
            SessionEvent::LeadCaptured(e) => e.session_id,
        }
    }

    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::SearchCompleted(_) => "search_completed",
            SessionEvent::LeadCaptured(_) => "lead_captured",
        }
    }
}
