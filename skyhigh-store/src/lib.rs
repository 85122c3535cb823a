pub mod app_config;
pub mod session_repo;

pub use session_repo::{spawn_idle_sweeper, InMemorySessionStore, SessionRepository, StoreError};
