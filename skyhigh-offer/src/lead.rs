use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use skyhigh_shared::Masked;
use uuid::Uuid;

use crate::models::FlightOffer;

/// Contact details typed into the lead form.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactDetails {
    pub name: Masked<String>,
    pub phone: Masked<String>,
    pub email: Masked<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ContactDetails {
    fn check_required(&self) -> Result<(), LeadError> {
        for (field, value) in [("name", &self.name), ("phone", &self.phone), ("email", &self.email)] {
            if value.expose().trim().is_empty() {
                return Err(LeadError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// The thank-you view shown once a lead is submitted.
#[derive(Debug, Clone, Serialize)]
pub struct LeadConfirmation {
    pub lead_id: Uuid,
    pub offer_id: String,
    pub total_price: u64,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Booking request for a selected offer. Nothing is booked; submission only
/// moves the form to its confirmation view.
#[derive(Debug, Clone)]
pub struct LeadForm {
    offer: FlightOffer,
    passengers: u32,
    confirmation: Option<LeadConfirmation>,
}

impl LeadForm {
    pub fn new(offer: FlightOffer, passengers: u32) -> Self {
        Self {
            offer,
            passengers,
            confirmation: None,
        }
    }

    pub fn offer(&self) -> &FlightOffer {
        &self.offer
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    /// Estimated total for all passengers.
    pub fn total_price(&self) -> u64 {
        self.offer.total_for(self.passengers)
    }

    pub fn confirmation(&self) -> Option<&LeadConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn is_submitted(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Submit the form. Name, phone and email must be non-blank.
    /// A submitted form is terminal.
    pub fn submit(&mut self, contact: ContactDetails) -> Result<&LeadConfirmation, LeadError> {
        if self.is_submitted() {
            return Err(LeadError::AlreadySubmitted);
        }
        contact.check_required()?;

        let confirmation = LeadConfirmation {
            lead_id: Uuid::new_v4(),
            offer_id: self.offer.id.clone(),
            total_price: self.total_price(),
            message: format!(
                "One of our luxury travel specialists will contact you at {} within the next 2 hours to finalize your booking.",
                contact.phone.expose().trim()
            ),
            submitted_at: Utc::now(),
        };

        tracing::info!(
            lead_id = %confirmation.lead_id,
            offer_id = %confirmation.offer_id,
            carrier = %self.offer.carrier,
            passengers = self.passengers,
            total_price = confirmation.total_price,
            name = %contact.name,
            phone = %contact.phone,
            email = %contact.email,
            has_notes = contact.notes.as_deref().is_some_and(|n| !n.trim().is_empty()),
            "Lead captured"
        );

        Ok(&*self.confirmation.insert(confirmation))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Booking request already submitted")]
    AlreadySubmitted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlightDuration;
    use chrono::NaiveTime;
    use skyhigh_core::CabinClass;

    fn offer(price: u32) -> FlightOffer {
        FlightOffer {
            id: "flight-2".to_string(),
            carrier: "Qatar Airways".to_string(),
            departure_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            duration: FlightDuration::new(7, 0),
            origin: "DOH".to_string(),
            destination: "CDG".to_string(),
            price,
            cabin_class: CabinClass::Business,
            stops: 0,
        }
    }

    fn contact(name: &str, phone: &str, email: &str) -> ContactDetails {
        ContactDetails {
            name: Masked::new(name.to_string()),
            phone: Masked::new(phone.to_string()),
            email: Masked::new(email.to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_total_price_multiplies_passengers() {
        let form = LeadForm::new(offer(1450), 3);
        assert_eq!(form.total_price(), 4350);
    }

    #[test]
    fn test_submit_moves_to_confirmation() {
        let mut form = LeadForm::new(offer(1450), 2);
        let confirmation = form.submit(contact("Ana Silva", "+44 20 7946 0000", "ana@example.com")).unwrap();
        assert_eq!(confirmation.offer_id, "flight-2");
        assert_eq!(confirmation.total_price, 2900);
        assert!(confirmation.message.contains("+44 20 7946 0000"));
        assert!(form.is_submitted());
    }

    #[test]
    fn test_blank_required_fields_rejected() {
        let mut form = LeadForm::new(offer(1450), 1);
        assert_eq!(
            form.submit(contact("  ", "123", "a@b.c")).unwrap_err(),
            LeadError::MissingField("name")
        );
        assert_eq!(
            form.submit(contact("Ana", "", "a@b.c")).unwrap_err(),
            LeadError::MissingField("phone")
        );
        assert_eq!(
            form.submit(contact("Ana", "123", "")).unwrap_err(),
            LeadError::MissingField("email")
        );
        assert!(!form.is_submitted());
    }

    #[test]
    fn test_second_submit_rejected() {
        let mut form = LeadForm::new(offer(1450), 1);
        form.submit(contact("Ana", "123", "a@b.c")).unwrap();
        assert_eq!(
            form.submit(contact("Ana", "123", "a@b.c")).unwrap_err(),
            LeadError::AlreadySubmitted
        );
    }

    #[test]
    fn test_contact_deserialization_without_notes() {
        let json = r#"{ "name": "Ana", "phone": "123", "email": "a@b.c" }"#;
        let contact: ContactDetails = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(contact.name.expose(), "Ana");
        assert!(contact.notes.is_none());
        assert!(!format!("{:?}", contact).contains("Ana"));
    }
}
