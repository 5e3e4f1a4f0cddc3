//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use infra_db::DatabaseError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Unauthorized".to_string(),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
            ApiError::Database(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", msg.clone())
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::NotFound(msg),
            DatabaseError::DuplicateEntry(msg) => ApiError::Conflict(msg),
            DatabaseError::BookingOverlap(msg) => ApiError::Conflict(msg),
            DatabaseError::BusinessRule(msg) => ApiError::Conflict(msg),
            DatabaseError::ForeignKeyViolation(msg) | DatabaseError::ConstraintViolation(msg) => {
                ApiError::Conflict(msg)
            }
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl From<domain_booking::BookingError> for ApiError {
    fn from(err: domain_booking::BookingError) -> Self {
        use domain_booking::BookingError;
        match err {
            BookingError::CustomerNotFound(msg) => ApiError::NotFound(msg),
            BookingError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            BookingError::RoomUnavailable { .. } => ApiError::Conflict(err.to_string()),
            BookingError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<domain_billing::BillingError> for ApiError {
    fn from(err: domain_billing::BillingError) -> Self {
        use domain_billing::BillingError;
        match err {
            BillingError::InvalidStatusTransition { .. } | BillingError::NotPayable(_) => {
                ApiError::Conflict(err.to_string())
            }
            BillingError::Money(e) => ApiError::Validation(e.to_string()),
            BillingError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<domain_property::PropertyError> for ApiError {
    fn from(err: domain_property::PropertyError) -> Self {
        use domain_property::PropertyError;
        match err {
            PropertyError::RoomTypeNotFound(msg) => ApiError::NotFound(msg),
            PropertyError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<domain_guest::GuestError> for ApiError {
    fn from(err: domain_guest::GuestError) -> Self {
        use domain_guest::GuestError;
        match err {
            GuestError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<domain_staff::StaffError> for ApiError {
    fn from(err: domain_staff::StaffError) -> Self {
        use domain_staff::StaffError;
        match err {
            StaffError::DuplicateUsername(_) | StaffError::DuplicateEmail(_) => {
                ApiError::Conflict(err.to_string())
            }
            StaffError::AuthenticationFailed | StaffError::InactiveAccount(_) => {
                ApiError::Unauthorized
            }
            StaffError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<core_kernel::CoreError> for ApiError {
    fn from(err: core_kernel::CoreError) -> Self {
        use core_kernel::CoreError;
        match err {
            CoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CoreError::InvalidStateTransition { .. } | CoreError::BusinessRule(_) => {
                ApiError::Conflict(err.to_string())
            }
            CoreError::Validation(_) | CoreError::Money(_) | CoreError::Stay(_) => {
                ApiError::Validation(err.to_string())
            }
            CoreError::Configuration(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
