//! Booking Domain
//!
//! This crate implements the booking lifecycle from confirmation through
//! check-in, check-out, cancellation, and no-show handling, together with
//! the room-availability rules that guard creation.
//!
//! # Booking Lifecycle
//!
//! ```text
//! Confirmed <-> OnHold
//!     |            |
//!     |            +--> NoShow
//!     +--> CheckedIn --> CheckedOut
//!     +--> Cancelled
//! ```
//!
//! CheckedOut, Cancelled, and NoShow are terminal.

pub mod booking;
pub mod availability;
pub mod line_item;
pub mod error;

pub use booking::{Booking, BookingStatus, generate_reference_number, quote_total};
pub use availability::{blocks_availability, is_room_available, find_available_rooms};
pub use line_item::BookingServiceLine;
pub use error::BookingError;
