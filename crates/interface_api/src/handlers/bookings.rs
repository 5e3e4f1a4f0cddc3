//! Booking handlers
//!
//! Creation quotes the total from the room type's nightly rate when the
//! caller does not supply an agreed price. The availability re-check and
//! the insert run in one transaction inside the repository, so two racing
//! requests for the same room and overlapping dates cannot both succeed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{BookingId, BookingServiceId, CustomerId, Money, RoomId, ServiceId, StayPeriod};
use domain_booking::{quote_total, Booking, BookingError, BookingServiceLine, BookingStatus};
use domain_staff::Capability;
use infra_db::{BookingRepository, CustomerRepository, RoomRepository, ServiceRepository};

use crate::auth::Claims;
use crate::dto::bookings::*;
use crate::dto::rooms::RoomResponse;
use crate::error::ApiError;
use crate::handlers::require;
use crate::AppState;

/// Creates a booking
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    require(&claims, Capability::ManageBookings)?;
    request.validate()?;

    let stay = StayPeriod::new(request.check_in_date, request.check_out_date)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let customers = CustomerRepository::new(state.pool.clone());
    let customer_id = CustomerId::from_uuid(request.customer_id);
    if !customers.exists(customer_id).await? {
        return Err(BookingError::CustomerNotFound(customer_id.to_string()).into());
    }

    let rooms = RoomRepository::new(state.pool.clone());
    let room = rooms.get_room(RoomId::from_uuid(request.room_id)).await?;
    if !room.is_sellable() {
        return Err(BookingError::RoomUnavailable {
            room: room.name.clone(),
            stay: stay.to_string(),
        }
        .into());
    }

    let room_type = rooms.get_room_type(room.room_type_id).await?;
    if !room_type.fits(request.adults, request.children) {
        return Err(ApiError::BadRequest(format!(
            "Room type {} sleeps at most {} guests",
            room_type.name, room_type.max_occupancy
        )));
    }

    let currency = room_type.base_price.currency();
    let total_price = match request.total_price {
        Some(agreed) => Money::new(agreed, currency),
        None => quote_total(room_type.base_price, &stay, &[]),
    };

    let mut booking = Booking::new(
        customer_id,
        room.id,
        stay,
        request.adults,
        total_price,
        Money::new(request.deposit_amount, currency),
    )?
    .with_children(request.children);
    if let Some(requests) = request.special_requests {
        booking = booking.with_special_requests(requests);
    }

    let repo = BookingRepository::new(state.pool.clone());
    repo.create(&mut booking).await?;

    Ok((StatusCode::CREATED, Json(booking.into())))
}

/// Lists bookings, optionally filtered
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let repo = BookingRepository::new(state.pool.clone());

    let bookings = if let Some(reference) = query.reference.as_deref() {
        repo.find_by_reference(reference).await?.into_iter().collect()
    } else if let Some(customer_id) = query.customer_id {
        repo.find_by_customer(CustomerId::from_uuid(customer_id))
            .await?
    } else if let Some(room_id) = query.room_id {
        repo.find_by_room(RoomId::from_uuid(room_id)).await?
    } else if let Some(date) = query.arrival_date {
        repo.find_arrivals(date).await?
    } else if let Some(date) = query.departure_date {
        repo.find_departures(date).await?
    } else if let (Some(from), Some(to)) = (query.from, query.to) {
        let period =
            StayPeriod::new(from, to).map_err(|e| ApiError::BadRequest(e.to_string()))?;
        repo.find_in_period(&period).await?
    } else if let Some(status) = query.status.as_deref() {
        let status = parse_booking_status(status)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown booking status: {status}")))?;
        repo.find_by_status(status).await?
    } else {
        repo.list().await?
    };

    Ok(Json(
        bookings.into_iter().map(BookingResponse::from).collect(),
    ))
}

/// Updates a booking's dates, room or party before arrival
///
/// The new stay is re-checked for conflicts inside the repository
/// transaction, with the booking itself excluded from the conflict set.
pub async fn update_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;
    request.validate()?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;
    if !matches!(
        booking.status,
        BookingStatus::Confirmed | BookingStatus::OnHold
    ) {
        return Err(ApiError::Conflict(format!(
            "Booking {} can no longer be modified",
            booking.reference_number
        )));
    }

    let stay = StayPeriod::new(request.check_in_date, request.check_out_date)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let rooms = RoomRepository::new(state.pool.clone());
    let room_id = request
        .room_id
        .map(RoomId::from_uuid)
        .unwrap_or(booking.room_id);
    let room = rooms.get_room(room_id).await?;
    if room.id != booking.room_id && !room.is_sellable() {
        return Err(BookingError::RoomUnavailable {
            room: room.name.clone(),
            stay: stay.to_string(),
        }
        .into());
    }

    let room_type = rooms.get_room_type(room.room_type_id).await?;
    if !room_type.fits(request.adults, request.children) {
        return Err(ApiError::BadRequest(format!(
            "Room type {} sleeps at most {} guests",
            room_type.name, room_type.max_occupancy
        )));
    }

    let currency = room_type.base_price.currency();
    booking.room_id = room.id;
    booking.stay = stay;
    booking.adults = request.adults;
    booking.children = request.children;
    booking.special_requests = request.special_requests;
    booking.total_price = match request.total_price {
        Some(agreed) => Money::new(agreed, currency),
        None => quote_total(room_type.base_price, &stay, &[]),
    };
    booking.updated_at = Utc::now();

    repo.reschedule(&booking).await?;
    Ok(Json(booking.into()))
}

/// Gets a booking by id
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let repo = BookingRepository::new(state.pool.clone());
    let booking = repo.get_by_id(BookingId::from_uuid(id)).await?;
    Ok(Json(booking.into()))
}

/// Lists the rooms free for a stay
pub async fn available_rooms(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let stay = StayPeriod::new(query.check_in_date, query.check_out_date)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let bookings = BookingRepository::new(state.pool.clone());
    let free_ids = bookings.find_available_room_ids(&stay).await?;

    let rooms = RoomRepository::new(state.pool.clone());
    let all = rooms.list_rooms().await?;
    let available = all
        .into_iter()
        .filter(|room| free_ids.contains(&room.id))
        .map(RoomResponse::from)
        .collect();

    Ok(Json(available))
}

/// Checks a single room's availability for a stay
///
/// `exclude_booking_id` leaves one booking out of the conflict set, so a
/// date change does not collide with the booking being changed.
pub async fn room_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RoomAvailabilityQuery>,
) -> Result<Json<RoomAvailabilityResponse>, ApiError> {
    let stay = StayPeriod::new(query.check_in_date, query.check_out_date)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let rooms = RoomRepository::new(state.pool.clone());
    let room = rooms.get_room(RoomId::from_uuid(id)).await?;

    let bookings = BookingRepository::new(state.pool.clone());
    let available = bookings
        .is_room_available(
            room.id,
            &stay,
            query.exclude_booking_id.map(BookingId::from_uuid),
        )
        .await?;

    Ok(Json(RoomAvailabilityResponse {
        room_id: room.id.into(),
        check_in_date: stay.check_in(),
        check_out_date: stay.check_out(),
        available,
    }))
}

/// Checks a guest in
pub async fn check_in(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;

    let room_status = booking.check_in(Utc::now())?;
    repo.update_with_room_status(&booking, room_status).await?;

    tracing::info!(reference = %booking.reference_number, "Guest checked in");
    Ok(Json(booking.into()))
}

/// Checks a guest out
pub async fn check_out(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;

    let room_status = booking.check_out(Utc::now())?;
    repo.update_with_room_status(&booking, room_status).await?;

    tracing::info!(reference = %booking.reference_number, "Guest checked out");
    Ok(Json(booking.into()))
}

/// Cancels a booking
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;

    booking.cancel()?;
    repo.update(&booking).await?;

    tracing::info!(reference = %booking.reference_number, "Booking cancelled");
    Ok(Json(booking.into()))
}

/// Marks a booking as a no-show
pub async fn mark_no_show(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;

    booking.mark_no_show()?;
    repo.update(&booking).await?;
    Ok(Json(booking.into()))
}

/// Places a booking on hold
pub async fn place_on_hold(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;

    booking.place_on_hold()?;
    repo.update(&booking).await?;
    Ok(Json(booking.into()))
}

/// Confirms a held booking
pub async fn confirm_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = BookingRepository::new(state.pool.clone());
    let mut booking = repo.get_by_id(BookingId::from_uuid(id)).await?;

    booking.confirm()?;
    repo.update(&booking).await?;
    Ok(Json(booking.into()))
}

/// Adds a service to a booking at the service's current price
pub async fn add_booking_service(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddBookingServiceRequest>,
) -> Result<(StatusCode, Json<BookingServiceResponse>), ApiError> {
    require(&claims, Capability::ManageBookings)?;
    request.validate()?;

    let bookings = BookingRepository::new(state.pool.clone());
    let booking = bookings.get_by_id(BookingId::from_uuid(id)).await?;
    if booking.status.is_terminal() {
        return Err(ApiError::Conflict(format!(
            "Booking {} is closed",
            booking.reference_number
        )));
    }

    let services = ServiceRepository::new(state.pool.clone());
    let service = services
        .get_service(ServiceId::from_uuid(request.service_id))
        .await?;
    if !service.is_available {
        return Err(ApiError::Conflict(format!(
            "Service {} is not available",
            service.name
        )));
    }

    let mut line = BookingServiceLine::new(
        booking.id,
        service.id,
        request.quantity,
        service.price,
        request.service_date.unwrap_or_else(Utc::now),
    )?;
    if let Some(notes) = request.notes {
        line = line.with_notes(notes);
    }

    services.add_booking_service(&line).await?;
    Ok((StatusCode::CREATED, Json(line.into())))
}

/// Lists the services consumed by a booking
pub async fn list_booking_services(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<BookingServiceResponse>>, ApiError> {
    let repo = ServiceRepository::new(state.pool.clone());
    let lines = repo
        .find_booking_services(BookingId::from_uuid(id))
        .await?;
    Ok(Json(
        lines.into_iter().map(BookingServiceResponse::from).collect(),
    ))
}

/// Removes a service line from a booking
pub async fn remove_booking_service(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((_id, line_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageBookings)?;

    let repo = ServiceRepository::new(state.pool.clone());
    repo.remove_booking_service(BookingServiceId::from_uuid(line_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
