//! Staff Domain
//!
//! User accounts for hotel staff: credential hashing, login checks, and
//! the role-to-capability mapping used for authorization.

pub mod user;
pub mod password;
pub mod authorization;
pub mod error;

pub use user::{User, UserRole};
pub use password::{hash_password, verify_password};
pub use authorization::Capability;
pub use error::StaffError;
