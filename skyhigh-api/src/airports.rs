use axum::{routing::get, Json, Router};
use skyhigh_core::iata::{Airport, AIRPORTS};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/airports", get(list_airports))
}

/// GET /v1/airports
/// Origin and destination choices for the search form
pub async fn list_airports() -> Json<&'static [Airport]> {
    Json(AIRPORTS)
}
