//! Integration tests for the Money type

use core_kernel::{Currency, Money, MoneyError};
use rust_decimal_macros::dec;

#[test]
fn money_rounds_to_two_decimal_places() {
    assert_eq!(Money::new(dec!(10.004), Currency::USD).amount(), dec!(10.00));
    assert_eq!(Money::new(dec!(10.006), Currency::USD).amount(), dec!(10.01));
    // round_dp uses banker's rounding at the midpoint
    assert_eq!(Money::new(dec!(10.005), Currency::USD).amount(), dec!(10.00));
    assert_eq!(Money::new(dec!(10.015), Currency::USD).amount(), dec!(10.02));
}

#[test]
fn zero_is_neither_positive_nor_negative() {
    let zero = Money::zero(Currency::EUR);
    assert!(zero.is_zero());
    assert!(!zero.is_positive());
    assert!(!zero.is_negative());
}

#[test]
fn checked_ops_reject_mixed_currencies() {
    let usd = Money::new(dec!(1), Currency::USD);
    let gbp = Money::new(dec!(1), Currency::GBP);

    assert!(matches!(
        usd.checked_add(&gbp),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
    assert!(matches!(
        usd.checked_sub(&gbp),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
}

#[test]
fn nightly_rate_times_nights() {
    let rate = Money::new(dec!(100.00), Currency::USD);
    let total = rate.times(2);
    assert_eq!(total.amount(), dec!(200.00));
}

#[test]
fn display_uses_currency_symbol() {
    let m = Money::new(dec!(99.5), Currency::USD);
    assert_eq!(m.to_string(), "$ 99.50");
}
