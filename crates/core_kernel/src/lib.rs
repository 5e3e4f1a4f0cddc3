//! Core Kernel - Foundational types and utilities for the hotel system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Stay periods for half-open date-range handling
//! - Common identifiers and value objects

pub mod money;
pub mod stay;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use stay::{StayPeriod, StayError};
pub use identifiers::{
    RoomId, RoomTypeId, CustomerId, BookingId, BookingServiceId,
    ServiceId, ServiceTypeId, UserId, BillId,
};
pub use error::CoreError;
