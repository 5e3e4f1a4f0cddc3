//! Guest Domain
//!
//! Customer records: who is staying, how to reach them, and the identity
//! document presented at the desk. Bookings reference customers by id;
//! there are no object back-references between the two.

pub mod customer;
pub mod error;

pub use customer::Customer;
pub use error::GuestError;
