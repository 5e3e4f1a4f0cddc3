//! Core error types used across the system

use thiserror::Error;
use crate::money::MoneyError;
use crate::stay::StayError;

/// Core error type for the kernel
///
/// The variants mirror the failure taxonomy every domain crate reports:
/// missing entities, input validation, lifecycle rule violations, and
/// business constraints such as deleting referenced rows. Each is a
/// distinct, catchable condition.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Stay error: {0}")]
    Stay(#[from] StayError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        CoreError::InvalidStateTransition(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        CoreError::BusinessRule(message.into())
    }
}
