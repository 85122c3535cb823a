pub mod iata;
pub mod search;

pub use iata::Airport;
pub use search::{CabinClass, SearchIntent};

/// Reasons a submitted search form is turned away before any offers are generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Origin airport is required")]
    MissingOrigin,
    #[error("Destination airport is required")]
    MissingDestination,
    #[error("Departure date is required")]
    MissingDepartDate,
    #[error("Unknown airport code: {0}")]
    UnknownAirport(String),
    #[error("Origin and destination must differ")]
    SameOriginAndDestination,
    #[error("Passenger count must be between 1 and {max}, got {0}", max = search::MAX_PASSENGERS)]
    PassengerCount(u32),
    #[error("Return date cannot be before the departure date")]
    ReturnBeforeDepart,
}

pub type ValidationResult<T> = Result<T, ValidationError>;
