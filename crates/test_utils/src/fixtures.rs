//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the hotel system.
//! These fixtures are designed to be consistent and predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{
    BillId, BookingId, Currency, CustomerId, Money, RoomId, RoomTypeId, ServiceId, ServiceTypeId,
    StayPeriod, UserId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard nightly rate
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Higher nightly rate for suite tests
    pub fn usd_suite_rate() -> Money {
        Money::new(dec!(250.00), Currency::USD)
    }

    /// A typical two-night booking total
    pub fn usd_200() -> Money {
        Money::new(dec!(200.00), Currency::USD)
    }

    /// Creates a zero amount
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }

    /// Creates a negative amount for refund scenarios
    pub fn usd_refund() -> Money {
        Money::new(dec!(-50.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard check-in date (Jan 1, 2025)
    pub fn check_in() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// Standard check-out date (Jan 3, 2025), a two-night stay
    pub fn check_out() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
    }

    /// Creates the standard two-night stay
    pub fn two_night_stay() -> StayPeriod {
        StayPeriod::new(Self::check_in(), Self::check_out()).unwrap()
    }

    /// A stay overlapping the standard one (Jan 2 to Jan 4)
    pub fn overlapping_stay() -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 4).unwrap(),
        )
        .unwrap()
    }

    /// A stay starting the day the standard one ends (Jan 3 to Jan 5)
    pub fn adjacent_stay() -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
        .unwrap()
    }

    /// A fixed timestamp during the standard stay
    pub fn during_stay() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 12, 0, 0).unwrap()
    }

    /// A due date two weeks after the standard stay
    pub fn due_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 17, 0, 0, 0).unwrap()
    }

    /// A timestamp after the due date for overdue tests
    pub fn after_due_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap()
    }

    /// Standard date of birth for a test guest (age 35)
    pub fn date_of_birth_35() -> NaiveDate {
        NaiveDate::from_ymd_opt(1989, 5, 15).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic room ID for testing
    pub fn room_id() -> RoomId {
        RoomId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic room type ID for testing
    pub fn room_type_id() -> RoomTypeId {
        RoomTypeId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic customer ID for testing
    pub fn customer_id() -> CustomerId {
        CustomerId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic booking ID for testing
    pub fn booking_id() -> BookingId {
        BookingId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }

    /// Creates a deterministic bill ID for testing
    pub fn bill_id() -> BillId {
        BillId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }

    /// Creates a deterministic service ID for testing
    pub fn service_id() -> ServiceId {
        ServiceId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440006").unwrap())
    }

    /// Creates a deterministic service type ID for testing
    pub fn service_type_id() -> ServiceTypeId {
        ServiceTypeId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440007").unwrap())
    }

    /// Creates a deterministic user ID for testing
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440008").unwrap())
    }
}

/// Fixture for decimal test data
pub struct DecimalFixtures;

impl DecimalFixtures {
    /// Standard tax amount on a two-night bill
    pub fn tax() -> Decimal {
        dec!(10.00)
    }

    /// Standard discount
    pub fn discount() -> Decimal {
        dec!(5.00)
    }

    /// Zero for comparison tests
    pub fn zero() -> Decimal {
        Decimal::ZERO
    }

    /// Small epsilon for tolerance comparisons
    pub fn epsilon() -> Decimal {
        dec!(0.000001)
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Standard room name
    pub fn room_name() -> &'static str {
        "R101"
    }

    /// Standard room type name
    pub fn room_type_name() -> &'static str {
        "Standard Double"
    }

    /// Standard booking reference
    pub fn booking_reference() -> &'static str {
        "BKG-TEST0001"
    }

    /// Standard bill number
    pub fn bill_number() -> &'static str {
        "BILL-20250103-000001"
    }

    /// Test email address
    pub fn email() -> &'static str {
        "john.doe@example.com"
    }

    /// Test phone number
    pub fn phone() -> &'static str {
        "+1-555-123-4567"
    }

    /// Test first name
    pub fn first_name() -> &'static str {
        "John"
    }

    /// Test last name
    pub fn last_name() -> &'static str {
        "Doe"
    }

    /// Test identification number
    pub fn identification_number() -> &'static str {
        "ID-123456789"
    }

    /// Test staff username
    pub fn username() -> &'static str {
        "frontdesk"
    }

    /// Test password that satisfies the length policy
    pub fn password() -> &'static str {
        "correct-horse-battery"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_fixtures_currencies_match() {
        let usd = MoneyFixtures::usd_100();
        assert_eq!(usd.currency(), Currency::USD);

        let eur = MoneyFixtures::eur_100();
        assert_eq!(eur.currency(), Currency::EUR);
    }

    #[test]
    fn test_temporal_fixtures_overlap_shape() {
        let stay = TemporalFixtures::two_night_stay();
        assert_eq!(stay.nights(), 2);
        assert!(stay.overlaps(&TemporalFixtures::overlapping_stay()));
        assert!(!stay.overlaps(&TemporalFixtures::adjacent_stay()));
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        let id1 = IdFixtures::room_id();
        let id2 = IdFixtures::room_id();
        assert_eq!(id1, id2);
    }
}
