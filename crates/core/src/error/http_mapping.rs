//! Pure mapping from service errors to HTTP status codes.

use super::ServiceError;

/// Maps a [`ServiceError`] to an HTTP status code.
///
/// - `Validation` -> 400 (Bad Request)
/// - `UpstreamAuth`, `UpstreamApi`, `UpstreamShape` -> 502 (Bad Gateway)
/// - `Internal` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use rsvpsync_core::error::{service_error_to_status_code, ServiceError};
///
/// let error = ServiceError::Validation("name is required".to_string());
/// assert_eq!(service_error_to_status_code(&error), 400);
/// ```
pub fn service_error_to_status_code(error: &ServiceError) -> u16 {
    match error {
        ServiceError::Validation(_) => 400,
        ServiceError::UpstreamAuth(_) => 502,
        ServiceError::UpstreamApi { .. } => 502,
        ServiceError::UpstreamShape(_) => 502,
        ServiceError::Internal(_) => 500,
    }
}
