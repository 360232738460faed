use axum::{body::Bytes, extract::State, Json};
use rsvpsync_core::error::ServiceError;
use rsvpsync_core::serde::deserialize_optional_id;
use serde::{Deserialize, Serialize};

use crate::handlers::AppError;
use crate::state::AppState;

/// Body of `POST /rsvp`. `event_id` may be a JSON string or number.
#[derive(Debug, Deserialize)]
pub struct RsvpRequest {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub event_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RsvpResponse {
    pub ok: bool,
    /// False when the name was already recorded for the event.
    pub added: bool,
}

/// POST /rsvp - Record an attendee name for an event.
///
/// The body is parsed as JSON regardless of its declared content type.
#[axum::debug_handler]
pub async fn create_rsvp(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RsvpResponse>, AppError> {
    let request: RsvpRequest = serde_json::from_slice(&body)
        .map_err(|e| ServiceError::Validation(format!("Bad Request: {e}")))?;

    let outcome = state
        .ledger
        .append(request.event_id.as_deref(), request.name.as_deref())
        .await?;

    Ok(Json(RsvpResponse {
        ok: true,
        added: outcome.is_added(),
    }))
}
