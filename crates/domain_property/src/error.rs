//! Property domain errors

use thiserror::Error;

/// Errors that can occur in the property domain
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Room type not found: {0}")]
    RoomTypeNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
