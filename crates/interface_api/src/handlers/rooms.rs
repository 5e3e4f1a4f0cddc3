//! Room and room type handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money, RoomId, RoomTypeId};
use domain_property::{PropertyError, Room, RoomType};
use domain_staff::Capability;
use infra_db::RoomRepository;

use crate::auth::Claims;
use crate::dto::rooms::*;
use crate::error::ApiError;
use crate::handlers::require;
use crate::AppState;

/// Creates a new room
pub async fn create_room(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    require(&claims, Capability::ManageInventory)?;
    request.validate()?;

    let repo = RoomRepository::new(state.pool.clone());
    // Reject unknown room types up front for a clearer error than the
    // foreign key violation would give.
    let room_type_id = RoomTypeId::from_uuid(request.room_type_id);
    if !repo.room_type_exists(room_type_id).await? {
        return Err(PropertyError::RoomTypeNotFound(room_type_id.to_string()).into());
    }

    let mut room = Room::new(
        request.name,
        RoomTypeId::from_uuid(request.room_type_id),
        request.floor,
    )?;
    if let Some(description) = request.description {
        room = room.with_description(description);
    }

    repo.create_room(&room).await?;
    Ok((StatusCode::CREATED, Json(room.into())))
}

/// Lists rooms, optionally by operational status
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(query): Query<RoomListQuery>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let rooms = match query.status.as_deref() {
        Some(status) => {
            let status = parse_room_status(status).ok_or_else(|| {
                ApiError::BadRequest(format!("Unknown room status: {status}"))
            })?;
            repo.find_rooms_by_status(status).await?
        }
        None => repo.list_rooms().await?,
    };
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Gets a room by id
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomResponse>, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let room = repo.get_room(RoomId::from_uuid(id)).await?;
    Ok(Json(room.into()))
}

/// Updates a room's details
pub async fn update_room(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    require(&claims, Capability::ManageInventory)?;
    request.validate()?;

    let repo = RoomRepository::new(state.pool.clone());
    let mut room = repo.get_room(RoomId::from_uuid(id)).await?;

    let room_type_id = RoomTypeId::from_uuid(request.room_type_id);
    if !repo.room_type_exists(room_type_id).await? {
        return Err(PropertyError::RoomTypeNotFound(room_type_id.to_string()).into());
    }

    room.name = request.name;
    room.room_type_id = room_type_id;
    room.floor = request.floor;
    room.description = request.description;
    room.updated_at = chrono::Utc::now();

    repo.update_room(&room).await?;
    Ok(Json(room.into()))
}

/// Moves a room to a new operational status
pub async fn update_room_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoomStatusRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    require(&claims, Capability::ManageInventory)?;

    let status = parse_room_status(&request.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown room status: {}", request.status)))?;

    let repo = RoomRepository::new(state.pool.clone());
    repo.set_room_status(RoomId::from_uuid(id), status).await?;
    let room = repo.get_room(RoomId::from_uuid(id)).await?;
    Ok(Json(room.into()))
}

/// Deletes a room with no booking history
pub async fn delete_room(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageInventory)?;

    let repo = RoomRepository::new(state.pool.clone());
    repo.delete_room(RoomId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates a new room type
pub async fn create_room_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateRoomTypeRequest>,
) -> Result<(StatusCode, Json<RoomTypeResponse>), ApiError> {
    require(&claims, Capability::ManageInventory)?;
    request.validate()?;

    let currency: Currency = request
        .currency
        .parse()
        .map_err(|e: core_kernel::MoneyError| ApiError::BadRequest(e.to_string()))?;

    let mut room_type = RoomType::new(
        request.name,
        Money::new(request.base_price, currency),
        request.max_occupancy,
    )?;
    if let Some(description) = request.description {
        room_type = room_type.with_description(description);
    }
    for amenity in request.amenities {
        room_type = room_type.with_amenity(amenity);
    }

    let repo = RoomRepository::new(state.pool.clone());
    repo.create_room_type(&room_type).await?;
    Ok((StatusCode::CREATED, Json(room_type.into())))
}

/// Lists all room types
pub async fn list_room_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomTypeResponse>>, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let room_types = repo.list_room_types().await?;
    Ok(Json(
        room_types.into_iter().map(RoomTypeResponse::from).collect(),
    ))
}

/// Gets a room type by id
pub async fn get_room_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomTypeResponse>, ApiError> {
    let repo = RoomRepository::new(state.pool.clone());
    let room_type = repo.get_room_type(RoomTypeId::from_uuid(id)).await?;
    Ok(Json(room_type.into()))
}

/// Updates a room type's details and nightly rate
pub async fn update_room_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoomTypeRequest>,
) -> Result<Json<RoomTypeResponse>, ApiError> {
    require(&claims, Capability::ManageInventory)?;
    request.validate()?;

    let currency: Currency = request
        .currency
        .parse()
        .map_err(|e: core_kernel::MoneyError| ApiError::BadRequest(e.to_string()))?;
    let base_price = Money::new(request.base_price, currency);
    if base_price.is_negative() {
        return Err(ApiError::BadRequest(
            "Base price must not be negative".to_string(),
        ));
    }

    let repo = RoomRepository::new(state.pool.clone());
    let mut room_type = repo.get_room_type(RoomTypeId::from_uuid(id)).await?;

    room_type.name = request.name;
    room_type.description = request.description;
    room_type.base_price = base_price;
    room_type.max_occupancy = request.max_occupancy;
    room_type.amenities = request.amenities;
    room_type.updated_at = chrono::Utc::now();

    repo.update_room_type(&room_type).await?;
    Ok(Json(room_type.into()))
}

/// Deletes a room type that no room references
pub async fn delete_room_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageInventory)?;

    let repo = RoomRepository::new(state.pool.clone());
    repo.delete_room_type(RoomTypeId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
