//! Room and room type DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_property::{Room, RoomStatus, RoomType};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    pub room_type_id: Uuid,
    pub floor: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoomRequest {
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    pub room_type_id: Uuid,
    pub floor: i32,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoomTypeRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub currency: String,
    #[validate(range(min = 1, max = 20))]
    pub max_occupancy: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoomStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RoomListQuery {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoomTypeRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub currency: String,
    #[validate(range(min = 1, max = 20))]
    pub max_occupancy: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: Uuid,
    pub name: String,
    pub room_type_id: Uuid,
    pub status: String,
    pub floor: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RoomTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub currency: String,
    pub max_occupancy: u32,
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
}

pub fn room_status_name(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Available => "available",
        RoomStatus::Occupied => "occupied",
        RoomStatus::Maintenance => "maintenance",
        RoomStatus::Cleaning => "cleaning",
        RoomStatus::Reserved => "reserved",
    }
}

pub fn parse_room_status(status: &str) -> Option<RoomStatus> {
    match status {
        "available" => Some(RoomStatus::Available),
        "occupied" => Some(RoomStatus::Occupied),
        "maintenance" => Some(RoomStatus::Maintenance),
        "cleaning" => Some(RoomStatus::Cleaning),
        "reserved" => Some(RoomStatus::Reserved),
        _ => None,
    }
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.into(),
            name: room.name,
            room_type_id: room.room_type_id.into(),
            status: room_status_name(room.status).to_string(),
            floor: room.floor,
            description: room.description,
            created_at: room.created_at,
        }
    }
}

impl From<RoomType> for RoomTypeResponse {
    fn from(rt: RoomType) -> Self {
        Self {
            id: rt.id.into(),
            name: rt.name,
            description: rt.description,
            base_price: rt.base_price.amount(),
            currency: rt.base_price.currency().code().to_string(),
            max_occupancy: rt.max_occupancy,
            amenities: rt.amenities,
            created_at: rt.created_at,
        }
    }
}
