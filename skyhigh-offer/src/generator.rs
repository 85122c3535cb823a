use chrono::{NaiveTime, TimeDelta};
use skyhigh_core::{CabinClass, SearchIntent};

use crate::models::{FlightDuration, FlightOffer};
use crate::random::RandomSource;

/// Premium carriers the mock results are drawn from.
pub const CARRIERS: &[&str] = &[
    "Emirates",
    "Qatar Airways",
    "Singapore Airlines",
    "Etihad Airways",
    "British Airways",
    "Lufthansa",
    "Air France",
];

pub const MIN_OFFERS: u32 = 4;
pub const MAX_OFFERS: u32 = 6;

const FIRST_DEPARTURE_HOUR: u32 = 6;
const DEPARTURE_SPACING_HOURS: i64 = 2;
const MIN_DURATION_HOURS: u32 = 3;
const MAX_DURATION_HOURS: u32 = 12;
const MAX_PRICE_VARIATION: u32 = 599;

/// Price floor per cabin, per passenger.
pub fn base_price(cabin_class: CabinClass) -> u32 {
    match cabin_class {
        CabinClass::First => 2500,
        CabinClass::Business => 1200,
    }
}

/// Fabricates plausible-looking flight offers for a search intent.
pub struct OfferGenerator {
    carriers: Vec<String>,
}

impl OfferGenerator {
    pub fn new(carriers: Vec<String>) -> Self {
        Self { carriers }
    }

    pub fn carriers(&self) -> &[String] {
        &self.carriers
    }

    /// Generate 4 to 6 offers sorted by ascending price.
    ///
    /// An incomplete intent (no origin, destination or departure date) yields
    /// an empty list without drawing from `rng`. Equal prices keep generation
    /// order.
    pub fn generate<R>(&self, intent: &SearchIntent, rng: &mut R) -> Vec<FlightOffer>
    where
        R: RandomSource + ?Sized,
    {
        let (Some(origin), Some(destination), Some(_)) =
            (intent.origin(), intent.destination(), intent.depart_date())
        else {
            return Vec::new();
        };
        if self.carriers.is_empty() {
            return Vec::new();
        }

        let count = rng.uniform(MIN_OFFERS, MAX_OFFERS);
        let first_departure = NaiveTime::from_hms_opt(FIRST_DEPARTURE_HOUR, 0, 0).unwrap_or_default();
        let floor = base_price(intent.cabin_class());
        let last_carrier = (self.carriers.len() - 1) as u32;

        let mut offers: Vec<FlightOffer> = (0..count)
            .map(|i| {
                let departure_time = first_departure + TimeDelta::hours(DEPARTURE_SPACING_HOURS * i64::from(i));
                let duration = FlightDuration::new(
                    rng.uniform(MIN_DURATION_HOURS, MAX_DURATION_HOURS),
                    rng.uniform(0, 59),
                );
                let carrier = &self.carriers[rng.uniform(0, last_carrier) as usize];
                let price = floor + rng.uniform(0, MAX_PRICE_VARIATION);
                let stops = rng.uniform(0, 1) as u8;

                FlightOffer {
                    id: format!("flight-{}", i),
                    carrier: carrier.clone(),
                    departure_time,
                    arrival_time: departure_time + duration.as_time_delta(),
                    duration,
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                    price,
                    cabin_class: intent.cabin_class(),
                    stops,
                }
            })
            .collect();

        offers.sort_by_key(|o| o.price);
        offers
    }
}

impl Default for OfferGenerator {
    fn default() -> Self {
        Self::new(CARRIERS.iter().map(|c| c.to_string()).collect())
    }
}
