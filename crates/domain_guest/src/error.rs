//! Guest domain errors

use thiserror::Error;

/// Errors that can occur in the guest domain
#[derive(Debug, Error)]
pub enum GuestError {
    #[error("Validation error: {0}")]
    Validation(String),
}
