//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the hotel system,
//! implementing the repository pattern on PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! Repositories hide SQL from the domain layer: queries go in, domain
//! entities come out. Statuses are stored as text with check constraints,
//! and the bookings table carries an exclusion constraint that makes a
//! double booking impossible at the storage level regardless of what the
//! application does.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, BookingRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/hotel")).await?;
//! let bookings = BookingRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;

pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use repositories::{
    BillRepository, BookingRepository, CustomerRepository, RoomRepository, ServiceRepository,
    UserRepository,
};
