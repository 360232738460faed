//! Service-level error taxonomy.
//!
//! Every module error converts into a [`ServiceError`], which the HTTP layer
//! renders with [`service_error_to_status_code`].

mod http_mapping;
mod types;

pub use http_mapping::service_error_to_status_code;
pub use types::ServiceError;
