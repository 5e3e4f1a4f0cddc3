//! Billing domain errors

use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Bill {0} does not accept payments in its current status")]
    NotPayable(String),

    #[error("Money error: {0}")]
    Money(#[from] core_kernel::MoneyError),

    #[error("Validation error: {0}")]
    Validation(String),
}
