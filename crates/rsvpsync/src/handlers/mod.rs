pub mod error;
pub mod events;
pub mod fallback;
pub mod health;
pub mod rsvp;

pub use error::AppError;
