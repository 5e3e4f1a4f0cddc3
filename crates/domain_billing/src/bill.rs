//! Bill aggregate

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, BookingId, CustomerId, Money, UserId};

use crate::error::BillingError;
use crate::payment::{PaymentMethod, PaymentRecord};

/// Bill status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillStatus {
    /// Being prepared, not yet presented to the guest
    Draft,
    /// Presented to the guest, awaiting payment
    Sent,
    /// Some money received, balance outstanding
    PartiallyPaid,
    /// Fully settled
    Paid,
    /// Past the due date with a balance outstanding
    Overdue,
    /// Voided before settlement
    Cancelled,
    /// Settled and then returned to the guest
    Refunded,
}

impl BillStatus {
    /// Returns true if the bill can still accept payments
    pub fn accepts_payments(&self) -> bool {
        matches!(
            self,
            BillStatus::Draft
                | BillStatus::Sent
                | BillStatus::PartiallyPaid
                | BillStatus::Overdue
        )
    }
}

/// A bill issued against a booking
///
/// The total is always derived from the charge components and is never
/// stored. References to the booking and customer are plain ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// Human-readable bill number, unique per bill
    pub bill_number: String,
    /// Booking this bill settles
    pub booking_id: BookingId,
    /// Customer responsible for payment
    pub customer_id: CustomerId,
    /// Staff member who issued the bill
    pub issued_by: UserId,
    /// Room and service charges before tax
    pub subtotal: Money,
    /// Tax on the subtotal
    pub tax_amount: Money,
    /// Discount applied to the whole bill
    pub discount_amount: Money,
    /// Sum of all payments received
    pub paid_amount: Money,
    /// Method of the most recent payment
    pub payment_method: Option<PaymentMethod>,
    /// Full payment history, append-only
    pub payments: Vec<PaymentRecord>,
    /// Status
    pub status: BillStatus,
    /// When the bill was issued
    pub issued_date: DateTime<Utc>,
    /// Payment deadline
    pub due_date: DateTime<Utc>,
    /// When the bill became fully paid
    pub paid_date: Option<DateTime<Utc>>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    /// Creates a draft bill for a booking
    ///
    /// Rejects negative charge components and a discount larger than the
    /// gross amount, so the derived total can never go negative.
    pub fn for_booking(
        booking_id: BookingId,
        customer_id: CustomerId,
        issued_by: UserId,
        subtotal: Money,
        tax_amount: Money,
        discount_amount: Money,
        due_date: DateTime<Utc>,
    ) -> Result<Self, BillingError> {
        if subtotal.is_negative() {
            return Err(BillingError::Validation(
                "Subtotal must not be negative".to_string(),
            ));
        }
        if tax_amount.is_negative() {
            return Err(BillingError::Validation(
                "Tax amount must not be negative".to_string(),
            ));
        }
        if discount_amount.is_negative() {
            return Err(BillingError::Validation(
                "Discount must not be negative".to_string(),
            ));
        }

        let gross = subtotal.checked_add(&tax_amount)?;
        if discount_amount > gross {
            return Err(BillingError::Validation(
                "Discount must not exceed subtotal plus tax".to_string(),
            ));
        }

        let now = Utc::now();
        let currency = subtotal.currency();
        Ok(Self {
            id: BillId::new_v7(),
            bill_number: generate_bill_number(now),
            booking_id,
            customer_id,
            issued_by,
            subtotal,
            tax_amount,
            discount_amount,
            paid_amount: Money::zero(currency),
            payment_method: None,
            payments: Vec::new(),
            status: BillStatus::Draft,
            issued_date: now,
            due_date,
            paid_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches a note
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Amount owed: subtotal plus tax minus discount
    ///
    /// Construction guarantees the components cannot drive this negative.
    pub fn total_amount(&self) -> Money {
        self.subtotal + self.tax_amount - self.discount_amount
    }

    /// Amount still outstanding
    ///
    /// Goes negative on overpayment; the refund flow settles the excess.
    pub fn remaining_balance(&self) -> Money {
        self.total_amount() - self.paid_amount
    }

    /// True once payments cover the total
    pub fn is_paid(&self) -> bool {
        self.paid_amount >= self.total_amount()
    }

    /// True if unpaid past the due date
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_paid() && now > self.due_date
    }

    /// Presents a draft bill to the guest
    pub fn send(&mut self) -> Result<(), BillingError> {
        if self.status != BillStatus::Draft {
            return Err(BillingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", BillStatus::Sent),
            });
        }
        self.status = BillStatus::Sent;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Applies a payment to the bill
    ///
    /// Appends to the payment history, accumulates the paid amount, and
    /// flips the status to Paid or PartiallyPaid. The payment method on the
    /// bill always reflects the most recent payment.
    pub fn record_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<(), BillingError> {
        if !self.status.accepts_payments() {
            return Err(BillingError::NotPayable(self.bill_number.clone()));
        }
        if !amount.is_positive() {
            return Err(BillingError::Validation(
                "Payment amount must be positive".to_string(),
            ));
        }

        self.paid_amount = self.paid_amount.checked_add(&amount)?;
        self.payment_method = Some(method);
        self.payments.push(PaymentRecord::new(amount, method, now));

        if self.is_paid() {
            self.status = BillStatus::Paid;
            self.paid_date = Some(now);
        } else {
            self.status = BillStatus::PartiallyPaid;
        }
        self.updated_at = Utc::now();

        tracing::debug!(
            bill_number = %self.bill_number,
            paid = %self.paid_amount.amount(),
            status = ?self.status,
            "payment recorded"
        );
        Ok(())
    }

    /// Settles the full outstanding balance in one payment
    pub fn mark_as_paid(
        &mut self,
        method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> Result<(), BillingError> {
        let remaining = self.remaining_balance();
        if !remaining.is_positive() {
            return Err(BillingError::Validation(
                "Bill has no outstanding balance".to_string(),
            ));
        }
        self.record_payment(remaining, method, now)
    }

    /// Flags an unpaid bill whose due date has passed
    pub fn mark_overdue(&mut self, now: DateTime<Utc>) -> Result<(), BillingError> {
        if !self.is_overdue(now) {
            return Err(BillingError::Validation(
                "Bill is not past due".to_string(),
            ));
        }
        if !matches!(
            self.status,
            BillStatus::Draft | BillStatus::Sent | BillStatus::PartiallyPaid
        ) {
            return Err(BillingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", BillStatus::Overdue),
            });
        }
        self.status = BillStatus::Overdue;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Voids an unsettled bill
    pub fn cancel(&mut self) -> Result<(), BillingError> {
        if self.status == BillStatus::Paid || self.status == BillStatus::Refunded {
            return Err(BillingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", BillStatus::Cancelled),
            });
        }
        self.status = BillStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns a settled bill's money to the guest
    pub fn refund(&mut self) -> Result<(), BillingError> {
        if self.status != BillStatus::Paid {
            return Err(BillingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", BillStatus::Refunded),
            });
        }
        self.status = BillStatus::Refunded;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Generates a bill number: "BILL-" plus the issue date and a six-digit
/// token. Uniqueness is enforced by the storage layer; collisions there
/// are retried with a fresh number.
pub fn generate_bill_number(issued: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    format!(
        "BILL-{:04}{:02}{:02}-{:06}",
        issued.year(),
        issued.month(),
        issued.day(),
        rng.gen_range(0..1_000_000u32)
    )
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Duration;
    use core_kernel::Currency;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn usd(cents: i64) -> Money {
        Money::new(Decimal::new(cents, 2), Currency::USD)
    }

    proptest! {
        #[test]
        fn paid_iff_payments_cover_total(
            subtotal in 1i64..1_000_000,
            tax in 0i64..100_000,
            paid in 1i64..2_000_000,
        ) {
            let mut b = Bill::for_booking(
                BookingId::new(),
                CustomerId::new(),
                UserId::new(),
                usd(subtotal),
                usd(tax),
                usd(0),
                Utc::now() + Duration::days(14),
            ).unwrap();
            b.record_payment(usd(paid), PaymentMethod::Cash, Utc::now()).unwrap();

            prop_assert_eq!(b.is_paid(), paid >= subtotal + tax);
            prop_assert_eq!(
                b.remaining_balance().amount(),
                Decimal::new(subtotal + tax - paid, 2)
            );
        }
    }
}
