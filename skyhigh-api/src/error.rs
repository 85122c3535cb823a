use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyhigh_core::ValidationError;
use skyhigh_offer::{LeadError, SessionError};
use skyhigh_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Session(e) => match e {
                SessionError::OfferNotFound(_) => StatusCode::NOT_FOUND,
                SessionError::Lead(LeadError::MissingField(_)) => StatusCode::BAD_REQUEST,
                SessionError::NoResults
                | SessionError::SearchPending
                | SessionError::NoSelection
                | SessionError::Lead(LeadError::AlreadySubmitted) => StatusCode::CONFLICT,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "Request rejected");

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
