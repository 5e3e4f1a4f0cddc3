//! Request and response data transfer objects

pub mod auth;
pub mod rooms;
pub mod customers;
pub mod bookings;
pub mod bills;
pub mod services;
pub mod users;
