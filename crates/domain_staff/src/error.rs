//! Staff domain errors

use thiserror::Error;

/// Errors that can occur in the staff domain
#[derive(Debug, Error)]
pub enum StaffError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Account is deactivated: {0}")]
    InactiveAccount(String),

    #[error("Validation error: {0}")]
    Validation(String),
}
