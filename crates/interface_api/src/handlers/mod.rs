//! Request handlers

pub mod health;
pub mod auth;
pub mod rooms;
pub mod customers;
pub mod bookings;
pub mod bills;
pub mod services;
pub mod users;

use crate::auth::Claims;
use crate::error::ApiError;
use domain_staff::Capability;

/// Rejects callers whose role lacks the capability
pub(crate) fn require(claims: &Claims, capability: Capability) -> Result<(), ApiError> {
    crate::auth::check_capability(claims, capability)
        .map_err(|e| ApiError::Forbidden(e.to_string()))
}
