pub mod models;
pub mod random;
pub mod generator;
pub mod lead;
pub mod session;
pub mod runner;

pub use models::{FlightDuration, FlightOffer};
pub use random::RandomSource;
pub use generator::OfferGenerator;
pub use lead::{ContactDetails, LeadConfirmation, LeadError, LeadForm};
pub use session::{SearchSession, SearchState, SearchTicket, SessionError};
pub use runner::{PendingSearch, SearchRunner, SharedSession};
