//! Property Domain
//!
//! This crate models the physical inventory of the hotel: rooms, the room
//! types they belong to, and the ancillary services offered to guests.
//!
//! Rooms carry an operational status (available, occupied, cleaning, ...)
//! that the booking lifecycle drives; pricing lives on the room type.

pub mod room;
pub mod room_type;
pub mod service;
pub mod error;

pub use room::{Room, RoomStatus};
pub use room_type::RoomType;
pub use service::{Service, ServiceType};
pub use error::PropertyError;
