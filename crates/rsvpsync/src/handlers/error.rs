use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rsvpsync_core::error::{service_error_to_status_code, ServiceError};
use serde_json::json;

pub struct AppError(pub ServiceError);

impl AppError {
    /// Message shown to callers. Upstream and internal details stay in the logs.
    fn public_message(&self) -> String {
        match &self.0 {
            ServiceError::Validation(message) => message.clone(),
            ServiceError::UpstreamAuth(_) => "Meetup authentication failed".to_string(),
            ServiceError::UpstreamApi { .. } => "Meetup API error".to_string(),
            ServiceError::UpstreamShape(_) => "Unexpected Meetup response".to_string(),
            ServiceError::Internal(_) => "Internal error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = service_error_to_status_code(&self.0);
        let status_code = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.code(), "Request failed");
        } else {
            tracing::debug!(error = %self.0, code = self.0.code(), "Request rejected");
        }

        let mut body = json!({
            "error": self.public_message(),
            "code": self.0.code(),
        });
        if let Some(status) = self.0.upstream_status() {
            body["status"] = json!(status);
        }

        (status_code, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<ServiceError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
