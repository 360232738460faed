use axum::{extract::State, Json};
use rsvpsync_core::merge::{combine, CombinedView};

use crate::handlers::AppError;
use crate::state::AppState;

/// GET /events - Upcoming events joined with local RSVPs.
///
/// Token, then events, then ledger snapshot. Any failure aborts the request
/// without partial results.
#[axum::debug_handler]
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<CombinedView>>, AppError> {
    let token = state.token_cache.get_token().await?;
    let events = state.events.fetch_events(&token).await?;
    let ledger = state.ledger.snapshot().await?;

    Ok(Json(combine(&events, &ledger, state.visibility)))
}
