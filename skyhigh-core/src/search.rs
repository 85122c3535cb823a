use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;

use crate::iata::is_known_airport;
use crate::{ValidationError, ValidationResult};

pub const MIN_PASSENGERS: u32 = 1;
pub const MAX_PASSENGERS: u32 = 6;

/// Service tier offered by the site. Drives the price floor of generated offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    #[default]
    Business,
    First,
}

impl CabinClass {
    /// Badge text shown on offer cards and the lead summary.
    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Business => "Business Class",
            CabinClass::First => "First Class",
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CabinClass::Business => write!(f, "business"),
            CabinClass::First => write!(f, "first"),
        }
    }
}

/// Trip parameters captured by one search form submission.
///
/// Route codes are normalized to trimmed upper case, with blank input treated
/// as absent. An intent is never mutated after construction; a new submission
/// builds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchIntent {
    origin: Option<String>,
    destination: Option<String>,
    depart_date: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
    passengers: u32,
    cabin_class: CabinClass,
}

fn normalize_code(code: Option<String>) -> Option<String> {
    code.map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
}

impl SearchIntent {
    pub fn new(
        origin: Option<String>,
        destination: Option<String>,
        depart_date: Option<NaiveDate>,
        passengers: u32,
        cabin_class: CabinClass,
    ) -> Self {
        Self {
            origin: normalize_code(origin),
            destination: normalize_code(destination),
            depart_date,
            return_date: None,
            passengers,
            cabin_class,
        }
    }

    pub fn with_return_date(mut self, return_date: Option<NaiveDate>) -> Self {
        self.return_date = return_date;
        self
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn depart_date(&self) -> Option<NaiveDate> {
        self.depart_date
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        self.return_date
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn cabin_class(&self) -> CabinClass {
        self.cabin_class
    }

    /// Origin, destination and departure date are all present.
    pub fn is_complete(&self) -> bool {
        self.origin.is_some() && self.destination.is_some() && self.depart_date.is_some()
    }

    /// Check the intent against the airport directory and trip rules.
    /// Reports the first problem found, in form order.
    pub fn validate(&self) -> ValidationResult<()> {
        let origin = self.origin.as_deref().ok_or(ValidationError::MissingOrigin)?;
        let destination = self.destination.as_deref().ok_or(ValidationError::MissingDestination)?;
        let depart = self.depart_date.ok_or(ValidationError::MissingDepartDate)?;

        for code in [origin, destination] {
            if !is_known_airport(code) {
                return Err(ValidationError::UnknownAirport(code.to_string()));
            }
        }
        if origin == destination {
            return Err(ValidationError::SameOriginAndDestination);
        }
        if !(MIN_PASSENGERS..=MAX_PASSENGERS).contains(&self.passengers) {
            return Err(ValidationError::PassengerCount(self.passengers));
        }
        if let Some(ret) = self.return_date {
            if ret < depart {
                return Err(ValidationError::ReturnBeforeDepart);
            }
        }
        Ok(())
    }
}
