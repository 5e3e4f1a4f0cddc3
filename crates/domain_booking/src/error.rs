//! Booking domain errors

use thiserror::Error;

/// Errors that can occur in the booking domain
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Room {room} is not available for {stay}")]
    RoomUnavailable { room: String, stay: String },

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
