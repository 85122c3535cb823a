use serde::Serialize;
use skyhigh_core::{SearchIntent, ValidationError};

use crate::lead::{ContactDetails, LeadConfirmation, LeadError, LeadForm};
use crate::models::FlightOffer;

/// Where a browsing session stands in the search-and-display flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchState {
    /// No search submitted yet
    #[default]
    Idle,
    /// A search was accepted and its offers are pending
    Loading { sequence: u64, intent: SearchIntent },
    /// Offers from the latest search, possibly empty
    Ready {
        sequence: u64,
        intent: SearchIntent,
        offers: Vec<FlightOffer>,
    },
}

/// Identifies one accepted submission. Only the ticket with the latest
/// sequence may publish results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchTicket {
    sequence: u64,
}

impl SearchTicket {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Per-visitor state: the current search, the last rejected submission and
/// the open lead form, if any.
#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    latest_sequence: u64,
    last_error: Option<ValidationError>,
    lead: Option<LeadForm>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading { .. })
    }

    /// Offers of the visible result set; empty unless ready.
    pub fn offers(&self) -> &[FlightOffer] {
        match &self.state {
            SearchState::Ready { offers, .. } => offers,
            _ => &[],
        }
    }

    pub fn last_error(&self) -> Option<&ValidationError> {
        self.last_error.as_ref()
    }

    pub fn lead(&self) -> Option<&LeadForm> {
        self.lead.as_ref()
    }

    /// Accept a search submission and move to `Loading`.
    ///
    /// A rejected intent leaves the current state untouched and is kept as
    /// `last_error`. An accepted one closes any open lead form. A submission
    /// while already loading supersedes the pending one.
    pub fn submit(&mut self, intent: SearchIntent) -> Result<SearchTicket, ValidationError> {
        if let Err(e) = intent.validate() {
            self.last_error = Some(e.clone());
            return Err(e);
        }

        self.last_error = None;
        // A selection belongs to the result set it was made from
        self.lead = None;
        self.latest_sequence += 1;
        let sequence = self.latest_sequence;
        self.state = SearchState::Loading { sequence, intent };

        Ok(SearchTicket { sequence })
    }

    /// Intent of the pending search, if `ticket` is still the latest one.
    pub fn pending_intent(&self, ticket: SearchTicket) -> Option<&SearchIntent> {
        match &self.state {
            SearchState::Loading { sequence, intent } if *sequence == ticket.sequence => Some(intent),
            _ => None,
        }
    }

    /// Publish offers for `ticket`. Results of a superseded search are
    /// dropped and `false` is returned.
    pub fn complete(&mut self, ticket: SearchTicket, offers: Vec<FlightOffer>) -> bool {
        let Some(intent) = self.pending_intent(ticket).cloned() else {
            tracing::debug!(
                sequence = ticket.sequence,
                latest = self.latest_sequence,
                "Dropping stale search result"
            );
            return false;
        };

        self.state = SearchState::Ready {
            sequence: ticket.sequence,
            intent,
            offers,
        };
        true
    }

    /// Open the lead form for an offer of the visible result set.
    pub fn select(&mut self, offer_id: &str) -> Result<&LeadForm, SessionError> {
        let (intent, offers) = match &self.state {
            SearchState::Ready { intent, offers, .. } => (intent, offers),
            SearchState::Loading { .. } => return Err(SessionError::SearchPending),
            SearchState::Idle => return Err(SessionError::NoResults),
        };

        let offer = offers
            .iter()
            .find(|o| o.id == offer_id)
            .cloned()
            .ok_or_else(|| SessionError::OfferNotFound(offer_id.to_string()))?;
        let form = LeadForm::new(offer, intent.passengers());

        Ok(&*self.lead.insert(form))
    }

    /// Close the lead form. Returns whether one was open.
    pub fn close_lead(&mut self) -> bool {
        self.lead.take().is_some()
    }

    pub fn submit_lead(&mut self, contact: ContactDetails) -> Result<&LeadConfirmation, SessionError> {
        let form = self.lead.as_mut().ok_or(SessionError::NoSelection)?;
        Ok(form.submit(contact)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No search results available")]
    NoResults,

    #[error("A search is still in progress")]
    SearchPending,

    #[error("Offer not found: {0}")]
    OfferNotFound(String),

    #[error("No flight has been selected")]
    NoSelection,

    #[error(transparent)]
    Lead(#[from] LeadError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::OfferGenerator;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use skyhigh_core::CabinClass;
    use skyhigh_shared::Masked;

    fn intent(origin: &str, destination: &str, passengers: u32) -> SearchIntent {
        SearchIntent::new(
            Some(origin.into()),
            Some(destination.into()),
            NaiveDate::from_ymd_opt(2025, 6, 1),
            passengers,
            CabinClass::Business,
        )
    }

    fn offers_for(intent: &SearchIntent, seed: u64) -> Vec<FlightOffer> {
        OfferGenerator::default().generate(intent, &mut StdRng::seed_from_u64(seed))
    }

    fn run_search(session: &mut SearchSession, intent: SearchIntent) {
        let ticket = session.submit(intent.clone()).unwrap();
        assert!(session.complete(ticket, offers_for(&intent, 1)));
    }

    #[test]
    fn test_idle_to_loading_to_ready() {
        let mut session = SearchSession::new();
        assert_eq!(session.state(), &SearchState::Idle);

        let jfk_lhr = intent("JFK", "LHR", 2);
        let ticket = session.submit(jfk_lhr.clone()).unwrap();
        assert_eq!(ticket.sequence(), 1);
        assert!(session.is_loading());
        assert!(session.offers().is_empty());

        let offers = offers_for(&jfk_lhr, 9);
        assert!(session.complete(ticket, offers.clone()));
        assert_eq!(session.offers(), offers.as_slice());
        assert!(matches!(session.state(), SearchState::Ready { sequence: 1, .. }));
    }

    #[test]
    fn test_latest_submission_wins() {
        let mut session = SearchSession::new();
        let first = session.submit(intent("JFK", "LHR", 1)).unwrap();
        let second = session.submit(intent("DXB", "SIN", 1)).unwrap();

        // The newer search completes first; the older one must not overwrite it
        let second_offers = offers_for(&intent("DXB", "SIN", 1), 2);
        assert!(session.complete(second, second_offers.clone()));
        assert!(!session.complete(first, offers_for(&intent("JFK", "LHR", 1), 3)));

        assert_eq!(session.offers(), second_offers.as_slice());
        assert!(session.offers().iter().all(|o| o.origin == "DXB"));
    }

    #[test]
    fn test_stale_completion_while_loading_is_dropped() {
        let mut session = SearchSession::new();
        let first = session.submit(intent("JFK", "LHR", 1)).unwrap();
        let second = session.submit(intent("CDG", "HND", 1)).unwrap();

        assert!(!session.complete(first, offers_for(&intent("JFK", "LHR", 1), 3)));
        assert!(session.is_loading());
        assert_eq!(session.pending_intent(second).and_then(|i| i.origin()), Some("CDG"));
    }

    #[test]
    fn test_invalid_submission_keeps_state() {
        let mut session = SearchSession::new();
        run_search(&mut session, intent("JFK", "LHR", 2));
        let before = session.state().clone();

        let err = session.submit(intent("JFK", "JFK", 2)).unwrap_err();
        assert_eq!(err, ValidationError::SameOriginAndDestination);
        assert_eq!(session.state(), &before);
        assert_eq!(session.last_error(), Some(&ValidationError::SameOriginAndDestination));

        // A good submission clears the error
        session.submit(intent("JFK", "LHR", 2)).unwrap();
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_select_relays_offer_and_passengers() {
        let mut session = SearchSession::new();
        assert_eq!(session.select("flight-0").unwrap_err(), SessionError::NoResults);

        run_search(&mut session, intent("JFK", "LHR", 3));
        let offer = session.offers()[0].clone();

        let form = session.select(&offer.id).unwrap();
        assert_eq!(form.offer(), &offer);
        assert_eq!(form.passengers(), 3);
        assert_eq!(form.total_price(), u64::from(offer.price) * 3);

        assert_eq!(
            session.select("flight-99").unwrap_err(),
            SessionError::OfferNotFound("flight-99".into())
        );
    }

    #[test]
    fn test_select_while_loading_rejected() {
        let mut session = SearchSession::new();
        session.submit(intent("JFK", "LHR", 1)).unwrap();
        assert_eq!(session.select("flight-0").unwrap_err(), SessionError::SearchPending);
    }

    #[test]
    fn test_lead_submission_and_close() {
        let mut session = SearchSession::new();
        let contact = || ContactDetails {
            name: Masked::new("Ana".into()),
            phone: Masked::new("555 0100".into()),
            email: Masked::new("ana@example.com".into()),
            notes: Some("Window seat".into()),
        };
        assert_eq!(session.submit_lead(contact()).unwrap_err(), SessionError::NoSelection);

        run_search(&mut session, intent("JFK", "LHR", 2));
        let offer_id = session.offers()[1].id.clone();
        session.select(&offer_id).unwrap();

        let confirmation = session.submit_lead(contact()).unwrap();
        assert_eq!(confirmation.offer_id, offer_id);
        assert_eq!(
            session.submit_lead(contact()).unwrap_err(),
            SessionError::Lead(LeadError::AlreadySubmitted)
        );

        assert!(session.close_lead());
        assert!(session.lead().is_none());
        assert!(!session.close_lead());
    }

    #[test]
    fn test_new_search_closes_open_lead() {
        let mut session = SearchSession::new();
        run_search(&mut session, intent("JFK", "LHR", 2));
        session.select("flight-0").unwrap();

        let ticket = session.submit(intent("DXB", "SIN", 1)).unwrap();
        assert!(session.lead().is_none());
        let contact = ContactDetails {
            name: Masked::new("Ana".into()),
            phone: Masked::new("555 0100".into()),
            email: Masked::new("ana@example.com".into()),
            notes: None,
        };
        assert_eq!(session.submit_lead(contact).unwrap_err(), SessionError::NoSelection);

        assert!(session.complete(ticket, offers_for(&intent("DXB", "SIN", 1), 4)));
        assert!(session.lead().is_none());
        assert!(session.offers().iter().all(|o| o.origin == "DXB"));
    }

    #[test]
    fn test_rejected_search_keeps_open_lead() {
        let mut session = SearchSession::new();
        run_search(&mut session, intent("JFK", "LHR", 2));
        session.select("flight-0").unwrap();

        session.submit(intent("JFK", "JFK", 2)).unwrap_err();
        assert_eq!(session.lead().map(|l| l.offer().id.as_str()), Some("flight-0"));
    }
}
