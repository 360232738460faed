use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Answers every request no route handles.
///
/// OPTIONS on any path succeeds with an empty body; anything else is 404.
pub async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Not found", "code": "not_found"})),
    )
        .into_response()
}
