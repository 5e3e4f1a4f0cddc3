//! Room aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{RoomId, RoomTypeId};
use crate::error::PropertyError;

/// Operational status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Ready for guests
    Available,
    /// A guest is checked in
    Occupied,
    /// Out of service for repairs
    Maintenance,
    /// Awaiting housekeeping after check-out
    Cleaning,
    /// Held for an imminent arrival
    Reserved,
}

impl RoomStatus {
    /// Returns true when the room can take a walk-in right now
    ///
    /// This is the operational "is the door openable" flag, not date-range
    /// availability; future bookings are a separate question answered by
    /// the availability checker.
    pub fn is_sellable(&self) -> bool {
        matches!(self, RoomStatus::Available)
    }
}

/// A physical hotel room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: RoomId,
    /// Room name or number (e.g. "R101")
    pub name: String,
    /// The type this room belongs to
    pub room_type_id: RoomTypeId,
    /// Current operational status
    pub status: RoomStatus,
    /// Description
    pub description: Option<String>,
    /// Floor the room is on
    pub floor: i32,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Creates a new room, initially available
    pub fn new(
        name: impl Into<String>,
        room_type_id: RoomTypeId,
        floor: i32,
    ) -> Result<Self, PropertyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PropertyError::Validation(
                "Room name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: RoomId::new_v7(),
            name,
            room_type_id,
            status: RoomStatus::Available,
            description: None,
            floor,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true when the room can take a walk-in right now
    pub fn is_sellable(&self) -> bool {
        self.status.is_sellable()
    }

    /// Moves the room to a new operational status
    pub fn set_status(&mut self, status: RoomStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_room_is_available() {
        let room = Room::new("R101", RoomTypeId::new(), 1).unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert!(room.is_sellable());
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Room::new("  ", RoomTypeId::new(), 1);
        assert!(matches!(result, Err(PropertyError::Validation(_))));
    }

    #[test]
    fn test_status_change_touches_updated_at() {
        let mut room = Room::new("R101", RoomTypeId::new(), 1).unwrap();
        let before = room.updated_at;
        room.set_status(RoomStatus::Cleaning);
        assert_eq!(room.status, RoomStatus::Cleaning);
        assert!(room.updated_at >= before);
    }

    #[test]
    fn test_occupied_room_is_not_sellable() {
        let mut room = Room::new("R101", RoomTypeId::new(), 1).unwrap();
        room.set_status(RoomStatus::Occupied);
        assert!(!room.is_sellable());
    }

    #[test]
    fn test_only_available_is_sellable() {
        for status in [
            RoomStatus::Occupied,
            RoomStatus::Maintenance,
            RoomStatus::Cleaning,
            RoomStatus::Reserved,
        ] {
            assert!(!status.is_sellable());
        }
    }
}
