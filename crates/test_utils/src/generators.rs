//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{BookingId, Currency, CustomerId, Money, RoomId, StayPeriod};
use domain_booking::BookingStatus;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating valid amount ranges
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000i64
}

/// Strategy for generating valid Money values with positive amounts
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (positive_amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating valid Money values (can be negative)
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating valid USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::USD))
}

/// Strategy for generating realistic nightly rates
pub fn nightly_rate_strategy() -> impl Strategy<Value = Money> {
    (2000i64..100_000i64).prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for generating positive Decimal values
pub fn positive_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64, 0u32..4u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for generating check-in dates within 2025
pub fn check_in_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..365i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating valid date ranges (check-in before check-out)
pub fn date_range_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..365i64, 1i64..30i64).prop_map(|(start_days, nights)| {
        let check_in = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(start_days);
        let check_out = check_in + Duration::days(nights);
        (check_in, check_out)
    })
}

/// Strategy for generating valid StayPeriod instances
pub fn stay_period_strategy() -> impl Strategy<Value = StayPeriod> {
    date_range_strategy().prop_map(|(check_in, check_out)| {
        StayPeriod::new(check_in, check_out).expect("Generated invalid stay")
    })
}

/// Strategy for generating booking statuses
pub fn booking_status_strategy() -> impl Strategy<Value = BookingStatus> {
    prop_oneof![
        Just(BookingStatus::Confirmed),
        Just(BookingStatus::CheckedIn),
        Just(BookingStatus::CheckedOut),
        Just(BookingStatus::Cancelled),
        Just(BookingStatus::OnHold),
        Just(BookingStatus::NoShow),
    ]
}

/// Strategy for generating party sizes that fit a double room
pub fn party_size_strategy() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=2u32, 0u32..=2u32)
}

/// Strategy for generating RoomId
pub fn room_id_strategy() -> impl Strategy<Value = RoomId> {
    any::<[u8; 16]>().prop_map(|bytes| RoomId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating CustomerId
pub fn customer_id_strategy() -> impl Strategy<Value = CustomerId> {
    any::<[u8; 16]>().prop_map(|bytes| CustomerId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating BookingId
pub fn booking_id_strategy() -> impl Strategy<Value = BookingId> {
    any::<[u8; 16]>().prop_map(|bytes| BookingId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_stays_have_at_least_one_night(stay in stay_period_strategy()) {
            prop_assert!(stay.nights() >= 1);
        }

        #[test]
        fn generated_positive_money_is_positive(money in positive_money_strategy()) {
            prop_assert!(money.is_positive());
        }

        #[test]
        fn generated_date_ranges_are_ordered((check_in, check_out) in date_range_strategy()) {
            prop_assert!(check_in < check_out);
        }
    }
}
