//! Repository implementations
//!
//! Each repository owns the SQL for one aggregate and maps rows to the
//! domain types on the way out. Constructors take a `PgPool` clone; pools
//! are cheap handles.

pub mod rooms;
pub mod customers;
pub mod bookings;
pub mod bills;
pub mod services;
pub mod users;

pub use rooms::RoomRepository;
pub use customers::CustomerRepository;
pub use bookings::BookingRepository;
pub use bills::BillRepository;
pub use services::ServiceRepository;
pub use users::UserRepository;
