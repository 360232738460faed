//! Debug endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /debug - Confirms the service is up and shows the configured group.
///
/// Makes no upstream or store calls.
#[axum::debug_handler]
pub async fn debug(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "group": state.group.as_str(),
    }))
}
