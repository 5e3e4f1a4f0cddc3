//! Billing Domain
//!
//! This crate implements billing for completed and in-progress stays:
//! the bill aggregate with its derived totals, the payment history, and
//! the settlement lifecycle.
//!
//! # Bill Lifecycle
//!
//! ```text
//! Draft --> Sent --> PartiallyPaid --> Paid --> Refunded
//!   |         |            |
//!   |         +--> Overdue +
//!   +--> Cancelled (from any unsettled state)
//! ```
//!
//! The total is never stored; it is always `subtotal + tax - discount`.

pub mod bill;
pub mod payment;
pub mod error;

pub use bill::{Bill, BillStatus, generate_bill_number};
pub use payment::{PaymentMethod, PaymentRecord};
pub use error::BillingError;
