//! Payment methods and the payment history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    Check,
    MobilePayment,
    OnlinePayment,
}

/// A single payment applied to a bill
///
/// Records are append-only; corrections are made with a compensating
/// entry, never by editing history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Amount paid
    pub amount: Money,
    /// How it was paid
    pub method: PaymentMethod,
    /// When it was received
    pub paid_at: DateTime<Utc>,
}

impl PaymentRecord {
    pub fn new(amount: Money, method: PaymentMethod, paid_at: DateTime<Utc>) -> Self {
        Self {
            amount,
            method,
            paid_at,
        }
    }
}
