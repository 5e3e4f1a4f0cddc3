//! Tests for the API surface: error mapping and wire-format conventions

use axum::http::StatusCode;
use axum::response::IntoResponse;

use interface_api::error::ApiError;

#[test]
fn error_variants_map_to_expected_statuses() {
    let cases = vec![
        (
            ApiError::NotFound("missing".to_string()),
            StatusCode::NOT_FOUND,
        ),
        (
            ApiError::BadRequest("bad".to_string()),
            StatusCode::BAD_REQUEST,
        ),
        (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
        (
            ApiError::Forbidden("no capability".to_string()),
            StatusCode::FORBIDDEN,
        ),
        (
            ApiError::Conflict("room already booked".to_string()),
            StatusCode::CONFLICT,
        ),
        (
            ApiError::Validation("negative amount".to_string()),
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        (
            ApiError::Internal("boom".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    ];

    for (error, expected) in cases {
        let response = error.into_response();
        assert_eq!(response.status(), expected);
    }
}

#[test]
fn overlap_rejection_surfaces_as_conflict() {
    let db_err = infra_db::DatabaseError::BookingOverlap(
        "Room is already booked for the requested dates".to_string(),
    );
    let api_err: ApiError = db_err.into();

    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn lifecycle_violation_surfaces_as_conflict() {
    let domain_err = domain_booking::BookingError::InvalidStatusTransition {
        from: "CheckedOut".to_string(),
        to: "CheckedIn".to_string(),
    };
    let api_err: ApiError = domain_err.into();

    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn delete_protection_surfaces_as_conflict() {
    let db_err = infra_db::DatabaseError::BusinessRule(
        "Room R101 has bookings and cannot be deleted".to_string(),
    );
    let api_err: ApiError = db_err.into();

    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn duplicate_account_fields_surface_as_conflict() {
    for domain_err in [
        domain_staff::StaffError::DuplicateUsername("jsmith".to_string()),
        domain_staff::StaffError::DuplicateEmail("jsmith@hotel.test".to_string()),
    ] {
        let api_err: ApiError = domain_err.into();
        let response = api_err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}

#[test]
fn unsellable_room_surfaces_as_conflict() {
    let domain_err = domain_booking::BookingError::RoomUnavailable {
        room: "R101".to_string(),
        stay: "2026-01-01 to 2026-01-03".to_string(),
    };
    let api_err: ApiError = domain_err.into();

    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[test]
fn unknown_room_type_surfaces_as_not_found() {
    let domain_err =
        domain_property::PropertyError::RoomTypeNotFound("RTYP-0001".to_string());
    let api_err: ApiError = domain_err.into();

    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn failed_login_surfaces_as_unauthorized() {
    let api_err: ApiError = domain_staff::StaffError::AuthenticationFailed.into();
    let response = api_err.into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

mod status_names {
    use domain_booking::BookingStatus;
    use domain_property::RoomStatus;
    use interface_api::dto::bookings::{booking_status_name, parse_booking_status};
    use interface_api::dto::rooms::{parse_room_status, room_status_name};

    #[test]
    fn booking_status_names_parse_back() {
        let statuses = [
            BookingStatus::Confirmed,
            BookingStatus::CheckedIn,
            BookingStatus::CheckedOut,
            BookingStatus::Cancelled,
            BookingStatus::OnHold,
            BookingStatus::NoShow,
        ];
        for status in statuses {
            assert_eq!(parse_booking_status(booking_status_name(status)), Some(status));
        }
    }

    #[test]
    fn room_status_names_parse_back() {
        let statuses = [
            RoomStatus::Available,
            RoomStatus::Occupied,
            RoomStatus::Maintenance,
            RoomStatus::Cleaning,
            RoomStatus::Reserved,
        ];
        for status in statuses {
            assert_eq!(parse_room_status(room_status_name(status)), Some(status));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(parse_booking_status("pending"), None);
        assert_eq!(parse_room_status("closed"), None);
    }
}
