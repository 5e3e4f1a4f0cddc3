//! Billing integration tests

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use core_kernel::{BookingId, Currency, CustomerId, Money, UserId};
use domain_billing::{Bill, BillStatus, PaymentMethod};

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn bill_with(sub: rust_decimal::Decimal, tax: rust_decimal::Decimal, disc: rust_decimal::Decimal) -> Bill {
    Bill::for_booking(
        BookingId::new(),
        CustomerId::new(),
        UserId::new(),
        usd(sub),
        usd(tax),
        usd(disc),
        Utc::now() + Duration::days(14),
    )
    .unwrap()
}

#[test]
fn total_combines_charges_tax_and_discount() {
    let b = bill_with(dec!(100), dec!(10), dec!(5));
    assert_eq!(b.total_amount().amount(), dec!(105));
}

#[test]
fn remaining_balance_tracks_payments() {
    let mut b = bill_with(dec!(100), dec!(10), dec!(5));
    b.record_payment(usd(dec!(50)), PaymentMethod::Cash, Utc::now())
        .unwrap();
    assert_eq!(b.remaining_balance().amount(), dec!(55));
}

#[test]
fn paid_boundary_is_exact() {
    let mut exact = bill_with(dec!(100), dec!(5), dec!(0));
    exact
        .record_payment(usd(dec!(105)), PaymentMethod::Cash, Utc::now())
        .unwrap();
    assert!(exact.is_paid());

    let mut short = bill_with(dec!(100), dec!(5), dec!(0));
    short
        .record_payment(usd(dec!(104.99)), PaymentMethod::Cash, Utc::now())
        .unwrap();
    assert!(!short.is_paid());
}

#[test]
fn payment_sequence_settles_bill() {
    let mut b = bill_with(dec!(100), dec!(0), dec!(0));
    let now = Utc::now();

    b.record_payment(usd(dec!(60)), PaymentMethod::Cash, now).unwrap();
    assert_eq!(b.status, BillStatus::PartiallyPaid);
    assert!(b.paid_date.is_none());
    assert_eq!(b.payment_method, Some(PaymentMethod::Cash));

    b.record_payment(usd(dec!(40)), PaymentMethod::CreditCard, now)
        .unwrap();
    assert_eq!(b.status, BillStatus::Paid);
    assert_eq!(b.paid_date, Some(now));
    assert_eq!(b.payment_method, Some(PaymentMethod::CreditCard));

    let history: Vec<_> = b.payments.iter().map(|p| p.amount.amount()).collect();
    assert_eq!(history, vec![dec!(60), dec!(40)]);
}

#[test]
fn overpayment_is_recorded_and_settles() {
    let mut b = bill_with(dec!(100), dec!(0), dec!(0));
    b.record_payment(usd(dec!(120)), PaymentMethod::OnlinePayment, Utc::now())
        .unwrap();
    assert!(b.is_paid());
    assert_eq!(b.remaining_balance().amount(), dec!(-20));
}

#[test]
fn due_date_drives_overdue() {
    let b = Bill::for_booking(
        BookingId::new(),
        CustomerId::new(),
        UserId::new(),
        usd(dec!(100)),
        usd(dec!(0)),
        usd(dec!(0)),
        Utc::now() + Duration::days(14),
    )
    .unwrap();

    assert!(!b.is_overdue(Utc::now()));
    assert!(b.is_overdue(Utc::now() + Duration::days(15)));
}

#[test]
fn settled_bill_is_never_overdue() {
    let mut b = Bill::for_booking(
        BookingId::new(),
        CustomerId::new(),
        UserId::new(),
        usd(dec!(100)),
        usd(dec!(0)),
        usd(dec!(0)),
        Utc::now() - Duration::days(30),
    )
    .unwrap();
    b.record_payment(usd(dec!(100)), PaymentMethod::Cash, Utc::now())
        .unwrap();
    assert!(!b.is_overdue(Utc::now()));
}
