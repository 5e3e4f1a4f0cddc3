//! Booking aggregate

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, CustomerId, Money, RoomId, StayPeriod};
use domain_property::RoomStatus;

use crate::error::BookingError;
use crate::line_item::BookingServiceLine;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Reservation confirmed, guest not yet arrived
    Confirmed,
    /// Guest is in the room
    CheckedIn,
    /// Stay completed
    CheckedOut,
    /// Cancelled before arrival
    Cancelled,
    /// Parked pending payment or a decision
    OnHold,
    /// Guest never arrived
    NoShow,
}

impl BookingStatus {
    /// Returns true for states from which no further transition is permitted
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::CheckedOut | BookingStatus::Cancelled | BookingStatus::NoShow
        )
    }
}

/// A room reservation
///
/// References to the customer and room are plain ids; lookups go through
/// the persistence layer, never through object back-references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Human-readable reference number, unique per booking
    pub reference_number: String,
    /// Customer who made the booking
    pub customer_id: CustomerId,
    /// Room that is booked
    pub room_id: RoomId,
    /// Booked nights, half-open [check_in, check_out)
    pub stay: StayPeriod,
    /// When the guest actually checked in
    pub actual_check_in: Option<DateTime<Utc>>,
    /// When the guest actually checked out
    pub actual_check_out: Option<DateTime<Utc>>,
    /// Number of adults
    pub adults: u32,
    /// Number of children
    pub children: u32,
    /// Special requests or notes
    pub special_requests: Option<String>,
    /// Total price of the stay
    pub total_price: Money,
    /// Deposit already paid
    pub deposit_amount: Money,
    /// Status
    pub status: BookingStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new confirmed booking
    ///
    /// The caller is responsible for having passed the availability check;
    /// creation and that check must share one transaction at the
    /// persistence boundary.
    pub fn new(
        customer_id: CustomerId,
        room_id: RoomId,
        stay: StayPeriod,
        adults: u32,
        total_price: Money,
        deposit_amount: Money,
    ) -> Result<Self, BookingError> {
        if adults == 0 {
            return Err(BookingError::Validation(
                "A booking needs at least one adult".to_string(),
            ));
        }
        if total_price.is_negative() {
            return Err(BookingError::Validation(
                "Total price must not be negative".to_string(),
            ));
        }
        if deposit_amount.is_negative() {
            return Err(BookingError::Validation(
                "Deposit must not be negative".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: BookingId::new_v7(),
            reference_number: generate_reference_number(),
            customer_id,
            room_id,
            stay,
            actual_check_in: None,
            actual_check_out: None,
            adults,
            children: 0,
            special_requests: None,
            total_price,
            deposit_amount,
            status: BookingStatus::Confirmed,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the number of children
    pub fn with_children(mut self, children: u32) -> Self {
        self.children = children;
        self
    }

    /// Records a special request
    pub fn with_special_requests(mut self, requests: impl Into<String>) -> Self {
        self.special_requests = Some(requests.into());
        self
    }

    /// Returns the number of booked nights
    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }

    /// Returns the balance still owed: total price minus deposit
    pub fn remaining_balance(&self) -> Money {
        self.total_price - self.deposit_amount
    }

    /// Checks a guest in
    ///
    /// Valid from Confirmed or OnHold. Returns the status the room should
    /// move to; the caller applies it in the same transaction.
    pub fn check_in(&mut self, now: DateTime<Utc>) -> Result<RoomStatus, BookingError> {
        self.transition_to(BookingStatus::CheckedIn)?;
        self.actual_check_in = Some(now);
        Ok(RoomStatus::Occupied)
    }

    /// Checks a guest out
    ///
    /// Valid from CheckedIn only. The room goes to Cleaning; housekeeping
    /// flips it back to Available separately.
    pub fn check_out(&mut self, now: DateTime<Utc>) -> Result<RoomStatus, BookingError> {
        self.transition_to(BookingStatus::CheckedOut)?;
        self.actual_check_out = Some(now);
        Ok(RoomStatus::Cleaning)
    }

    /// Cancels the booking
    ///
    /// Valid from Confirmed or OnHold. Leaves the room status untouched.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        self.transition_to(BookingStatus::Cancelled)
    }

    /// Marks the booking as a no-show
    pub fn mark_no_show(&mut self) -> Result<(), BookingError> {
        self.transition_to(BookingStatus::NoShow)
    }

    /// Parks the booking on hold
    pub fn place_on_hold(&mut self) -> Result<(), BookingError> {
        self.transition_to(BookingStatus::OnHold)
    }

    /// Reinstates an on-hold booking to Confirmed
    pub fn confirm(&mut self) -> Result<(), BookingError> {
        self.transition_to(BookingStatus::Confirmed)
    }

    /// Moves the booking to the given status, enforcing the lifecycle rules
    pub fn transition_to(&mut self, target: BookingStatus) -> Result<(), BookingError> {
        if !self.can_transition_to(target) {
            return Err(BookingError::InvalidStatusTransition {
                from: format!("{:?}", self.status),
                to: format!("{:?}", target),
            });
        }
        self.status = target;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Checks if a transition is valid
    fn can_transition_to(&self, target: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self.status, target),
            (Confirmed, CheckedIn)
                | (Confirmed, Cancelled)
                | (Confirmed, OnHold)
                | (Confirmed, NoShow)
                | (OnHold, Confirmed)
                | (OnHold, CheckedIn)
                | (OnHold, Cancelled)
                | (OnHold, NoShow)
                | (CheckedIn, CheckedOut)
        )
    }
}

/// Computes the price quote for a stay: nightly rate times nights, plus
/// any pre-selected service lines
///
/// Documented input contract for booking creation; callers may instead
/// supply an agreed total directly.
pub fn quote_total(
    nightly_rate: Money,
    stay: &StayPeriod,
    lines: &[BookingServiceLine],
) -> Money {
    lines
        .iter()
        .fold(nightly_rate.times(stay.nights()), |acc, line| {
            acc + line.total_price()
        })
}

/// Generates a booking reference number: "BKG-" plus eight uppercase
/// alphanumerics. Uniqueness is enforced by the storage layer; collisions
/// there are retried with a fresh number.
pub fn generate_reference_number() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    let token: String = (0..8)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("BKG-{}", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    fn stay() -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        )
        .unwrap()
    }

    fn booking() -> Booking {
        Booking::new(
            CustomerId::new(),
            RoomId::new(),
            stay(),
            2,
            usd(dec!(200)),
            usd(dec!(50)),
        )
        .unwrap()
    }

    #[test]
    fn test_new_booking_is_confirmed() {
        let b = booking();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert!(b.reference_number.starts_with("BKG-"));
        assert_eq!(b.nights(), 2);
    }

    #[test]
    fn test_remaining_balance() {
        let b = booking();
        assert_eq!(b.remaining_balance().amount(), dec!(150));
    }

    #[test]
    fn test_check_in_sets_actual_date_and_room_status() {
        let mut b = booking();
        let now = Utc::now();
        let room_status = b.check_in(now).unwrap();

        assert_eq!(b.status, BookingStatus::CheckedIn);
        assert_eq!(b.actual_check_in, Some(now));
        assert_eq!(room_status, RoomStatus::Occupied);
    }

    #[test]
    fn test_double_check_in_rejected() {
        let mut b = booking();
        b.check_in(Utc::now()).unwrap();
        let result = b.check_in(Utc::now());
        assert!(matches!(
            result,
            Err(BookingError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_check_out_requires_check_in() {
        let mut b = booking();
        assert!(b.check_out(Utc::now()).is_err());

        b.check_in(Utc::now()).unwrap();
        let room_status = b.check_out(Utc::now()).unwrap();
        assert_eq!(room_status, RoomStatus::Cleaning);
        assert!(b.actual_check_out.is_some());
    }

    #[test]
    fn test_cancel_from_checked_in_rejected() {
        let mut b = booking();
        b.check_in(Utc::now()).unwrap();
        assert!(matches!(
            b.cancel(),
            Err(BookingError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_cancelled_is_terminal() {
        let mut b = booking();
        b.cancel().unwrap();
        assert!(b.status.is_terminal());
        assert!(b.confirm().is_err());
        assert!(b.check_in(Utc::now()).is_err());
        assert!(b.cancel().is_err());
    }

    #[test]
    fn test_hold_and_reinstate() {
        let mut b = booking();
        b.place_on_hold().unwrap();
        assert_eq!(b.status, BookingStatus::OnHold);
        b.confirm().unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);
    }

    #[test]
    fn test_no_show_from_hold() {
        let mut b = booking();
        b.place_on_hold().unwrap();
        b.mark_no_show().unwrap();
        assert!(b.status.is_terminal());
    }

    #[test]
    fn test_zero_adults_rejected() {
        let result = Booking::new(
            CustomerId::new(),
            RoomId::new(),
            stay(),
            0,
            usd(dec!(200)),
            usd(dec!(0)),
        );
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[test]
    fn test_quote_total_room_only() {
        // 100/night for 2 nights
        let total = quote_total(usd(dec!(100)), &stay(), &[]);
        assert_eq!(total.amount(), dec!(200));
    }
}
