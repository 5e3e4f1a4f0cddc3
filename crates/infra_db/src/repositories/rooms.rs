//! Room and room type repository
//!
//! Rooms and their types share a repository because every room query
//! either joins on or validates against its type.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{Currency, Money, RoomId, RoomTypeId};
use domain_property::{Room, RoomStatus, RoomType};

use crate::error::DatabaseError;

/// Repository for rooms and room types
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    room_id: Uuid,
    room_number: String,
    room_type_id: Uuid,
    floor: i32,
    status: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct RoomTypeRow {
    room_type_id: Uuid,
    name: String,
    description: Option<String>,
    base_price: Decimal,
    currency: String,
    max_occupancy: i32,
    amenities: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub(crate) fn room_status_to_db(status: RoomStatus) -> &'static str {
    match status {
        RoomStatus::Available => "available",
        RoomStatus::Occupied => "occupied",
        RoomStatus::Maintenance => "maintenance",
        RoomStatus::Cleaning => "cleaning",
        RoomStatus::Reserved => "reserved",
    }
}

pub(crate) fn room_status_from_db(status: &str) -> Result<RoomStatus, DatabaseError> {
    match status {
        "available" => Ok(RoomStatus::Available),
        "occupied" => Ok(RoomStatus::Occupied),
        "maintenance" => Ok(RoomStatus::Maintenance),
        "cleaning" => Ok(RoomStatus::Cleaning),
        "reserved" => Ok(RoomStatus::Reserved),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown room status '{other}'"
        ))),
    }
}

pub(crate) fn currency_from_db(code: &str) -> Result<Currency, DatabaseError> {
    Currency::from_str(code)
        .map_err(|e| DatabaseError::CorruptRow(format!("bad currency: {e}")))
}

impl TryFrom<RoomRow> for Room {
    type Error = DatabaseError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: RoomId::from_uuid(row.room_id),
            name: row.room_number,
            room_type_id: RoomTypeId::from_uuid(row.room_type_id),
            status: room_status_from_db(&row.status)?,
            description: row.description,
            floor: row.floor,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<RoomTypeRow> for RoomType {
    type Error = DatabaseError;

    fn try_from(row: RoomTypeRow) -> Result<Self, Self::Error> {
        Ok(RoomType {
            id: RoomTypeId::from_uuid(row.room_type_id),
            name: row.name,
            description: row.description,
            base_price: Money::new(row.base_price, currency_from_db(&row.currency)?),
            max_occupancy: row.max_occupancy as u32,
            amenities: row.amenities,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ROOM_COLUMNS: &str =
    "room_id, room_number, room_type_id, floor, status, description, created_at, updated_at";

const ROOM_TYPE_COLUMNS: &str = "room_type_id, name, description, base_price, currency, \
     max_occupancy, amenities, created_at, updated_at";

impl RoomRepository {
    /// Creates a new RoomRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a room by its identifier
    pub async fn get_room(&self, room_id: RoomId) -> Result<Room, DatabaseError> {
        let row = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE room_id = $1"
        ))
        .bind(room_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Room", room_id))?;

        row.try_into()
    }

    /// Retrieves all rooms, ordered by room number
    pub async fn list_rooms(&self) -> Result<Vec<Room>, DatabaseError> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY room_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Room::try_from).collect()
    }

    /// Retrieves all rooms in the given operational status
    pub async fn find_rooms_by_status(
        &self,
        status: RoomStatus,
    ) -> Result<Vec<Room>, DatabaseError> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE status = $1 ORDER BY room_number"
        ))
        .bind(room_status_to_db(status))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Room::try_from).collect()
    }

    /// Inserts a new room
    pub async fn create_room(&self, room: &Room) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO rooms (room_id, room_number, room_type_id, floor, status, \
             description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(room.id.as_uuid())
        .bind(&room.name)
        .bind(room.room_type_id.as_uuid())
        .bind(room.floor)
        .bind(room_status_to_db(room.status))
        .bind(&room.description)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a room's mutable fields
    pub async fn update_room(&self, room: &Room) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE rooms SET room_number = $2, room_type_id = $3, floor = $4, \
             status = $5, description = $6, updated_at = $7 WHERE room_id = $1",
        )
        .bind(room.id.as_uuid())
        .bind(&room.name)
        .bind(room.room_type_id.as_uuid())
        .bind(room.floor)
        .bind(room_status_to_db(room.status))
        .bind(&room.description)
        .bind(room.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Room", room.id));
        }
        Ok(())
    }

    /// Updates only a room's operational status
    pub async fn set_room_status(
        &self,
        room_id: RoomId,
        status: RoomStatus,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE rooms SET status = $2, updated_at = $3 WHERE room_id = $1",
        )
        .bind(room_id.as_uuid())
        .bind(room_status_to_db(status))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Room", room_id));
        }
        Ok(())
    }

    /// Deletes a room
    ///
    /// Refuses when any booking references the room; history must stay
    /// intact.
    pub async fn delete_room(&self, room_id: RoomId) -> Result<(), DatabaseError> {
        let (in_use,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE room_id = $1)",
        )
        .bind(room_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(DatabaseError::BusinessRule(format!(
                "Room {} has bookings and cannot be deleted",
                room_id
            )));
        }

        let result = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(room_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Room", room_id));
        }
        Ok(())
    }

    /// Retrieves a room type by its identifier
    pub async fn get_room_type(
        &self,
        room_type_id: RoomTypeId,
    ) -> Result<RoomType, DatabaseError> {
        let row = sqlx::query_as::<_, RoomTypeRow>(&format!(
            "SELECT {ROOM_TYPE_COLUMNS} FROM room_types WHERE room_type_id = $1"
        ))
        .bind(room_type_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("RoomType", room_type_id))?;

        row.try_into()
    }

    /// Returns true if a room type with this id exists
    pub async fn room_type_exists(
        &self,
        room_type_id: RoomTypeId,
    ) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM room_types WHERE room_type_id = $1)",
        )
        .bind(room_type_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Retrieves all room types
    pub async fn list_room_types(&self) -> Result<Vec<RoomType>, DatabaseError> {
        let rows = sqlx::query_as::<_, RoomTypeRow>(&format!(
            "SELECT {ROOM_TYPE_COLUMNS} FROM room_types ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RoomType::try_from).collect()
    }

    /// Inserts a new room type
    pub async fn create_room_type(&self, room_type: &RoomType) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO room_types (room_type_id, name, description, base_price, currency, \
             max_occupancy, amenities, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(room_type.id.as_uuid())
        .bind(&room_type.name)
        .bind(&room_type.description)
        .bind(room_type.base_price.amount())
        .bind(room_type.base_price.currency().code())
        .bind(room_type.max_occupancy as i32)
        .bind(&room_type.amenities)
        .bind(room_type.created_at)
        .bind(room_type.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a room type
    pub async fn update_room_type(&self, room_type: &RoomType) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE room_types SET name = $2, description = $3, base_price = $4, \
             currency = $5, max_occupancy = $6, amenities = $7, updated_at = $8 \
             WHERE room_type_id = $1",
        )
        .bind(room_type.id.as_uuid())
        .bind(&room_type.name)
        .bind(&room_type.description)
        .bind(room_type.base_price.amount())
        .bind(room_type.base_price.currency().code())
        .bind(room_type.max_occupancy as i32)
        .bind(&room_type.amenities)
        .bind(room_type.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("RoomType", room_type.id));
        }
        Ok(())
    }

    /// Deletes a room type, refusing while rooms of this type exist
    pub async fn delete_room_type(&self, room_type_id: RoomTypeId) -> Result<(), DatabaseError> {
        let (in_use,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM rooms WHERE room_type_id = $1)",
        )
        .bind(room_type_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(DatabaseError::BusinessRule(format!(
                "RoomType {} still has rooms and cannot be deleted",
                room_type_id
            )));
        }

        let result = sqlx::query("DELETE FROM room_types WHERE room_type_id = $1")
            .bind(room_type_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("RoomType", room_type_id));
        }
        Ok(())
    }
}
