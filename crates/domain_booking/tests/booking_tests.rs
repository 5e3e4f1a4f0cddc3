//! End-to-end tests for the booking lifecycle and availability rules

use chrono::{NaiveDate, Utc};
use core_kernel::{Currency, CustomerId, Money, StayPeriod};
use domain_booking::{
    find_available_rooms, is_room_available, quote_total, Booking, BookingError,
    BookingServiceLine, BookingStatus,
};
use domain_property::{Room, RoomStatus, RoomType};
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stay(from: NaiveDate, to: NaiveDate) -> StayPeriod {
    StayPeriod::new(from, to).unwrap()
}

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

fn standard_room() -> (RoomType, Room) {
    let room_type = RoomType::new("Standard Double", usd(dec!(100.00)), 2).unwrap();
    let room = Room::new("R101", room_type.id, 1).unwrap();
    (room_type, room)
}

fn book(room: &Room, room_type: &RoomType, from: NaiveDate, to: NaiveDate) -> Booking {
    let period = stay(from, to);
    let total = quote_total(room_type.base_price, &period, &[]);
    Booking::new(
        CustomerId::new(),
        room.id,
        period,
        2,
        total,
        Money::zero(Currency::USD),
    )
    .unwrap()
}

#[test]
fn two_night_stay_at_100_costs_200() {
    let (room_type, room) = standard_room();
    let booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));

    assert_eq!(booking.nights(), 2);
    assert_eq!(booking.total_price, usd(dec!(200.00)));
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert!(booking.reference_number.starts_with("BKG-"));
}

#[test]
fn overlapping_stay_is_rejected_adjacent_is_not() {
    let (room_type, room) = standard_room();
    let existing = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));
    let bookings = vec![existing];

    // Jan 2 to Jan 4 shares the night of Jan 2
    assert!(!is_room_available(
        &bookings,
        room.id,
        &stay(date(2025, 1, 2), date(2025, 1, 4)),
        None
    ));

    // Jan 3 to Jan 5 starts on checkout day, no shared night
    assert!(is_room_available(
        &bookings,
        room.id,
        &stay(date(2025, 1, 3), date(2025, 1, 5)),
        None
    ));
}

#[test]
fn full_lifecycle_updates_room_status() {
    let (room_type, room) = standard_room();
    let mut booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));

    let on_arrival = booking.check_in(Utc::now()).unwrap();
    assert_eq!(on_arrival, RoomStatus::Occupied);
    assert_eq!(booking.status, BookingStatus::CheckedIn);
    assert!(booking.actual_check_in.is_some());

    let on_departure = booking.check_out(Utc::now()).unwrap();
    assert_eq!(on_departure, RoomStatus::Cleaning);
    assert_eq!(booking.status, BookingStatus::CheckedOut);
    assert!(booking.actual_check_out.is_some());
}

#[test]
fn checked_out_booking_is_closed() {
    let (room_type, room) = standard_room();
    let mut booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));
    booking.check_in(Utc::now()).unwrap();
    booking.check_out(Utc::now()).unwrap();

    assert!(booking.status.is_terminal());
    let err = booking.cancel().unwrap_err();
    assert!(matches!(err, BookingError::InvalidStatusTransition { .. }));
}

#[test]
fn cancelled_booking_releases_the_room() {
    let (room_type, room) = standard_room();
    let mut existing = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));
    existing.cancel().unwrap();

    assert!(is_room_available(
        &[existing],
        room.id,
        &stay(date(2025, 1, 1), date(2025, 1, 3)),
        None
    ));
}

#[test]
fn hold_and_confirm_round_trip() {
    let (room_type, room) = standard_room();
    let mut booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));

    booking.place_on_hold().unwrap();
    assert_eq!(booking.status, BookingStatus::OnHold);

    // A held booking still blocks the room
    assert!(!is_room_available(
        std::slice::from_ref(&booking),
        room.id,
        &stay(date(2025, 1, 2), date(2025, 1, 4)),
        None
    ));

    booking.confirm().unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
}

#[test]
fn no_show_from_confirmed() {
    let (room_type, room) = standard_room();
    let mut booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));

    booking.mark_no_show().unwrap();
    assert_eq!(booking.status, BookingStatus::NoShow);
    assert!(booking.status.is_terminal());
}

#[test]
fn cannot_check_out_without_checking_in() {
    let (room_type, room) = standard_room();
    let mut booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));

    let err = booking.check_out(Utc::now()).unwrap_err();
    assert!(matches!(err, BookingError::InvalidStatusTransition { .. }));
    assert!(booking.actual_check_out.is_none());
}

#[test]
fn quote_includes_service_lines() {
    let (room_type, room) = standard_room();
    let period = stay(date(2025, 1, 1), date(2025, 1, 3));

    let booking = book(&room, &room_type, date(2025, 1, 1), date(2025, 1, 3));
    let breakfast = BookingServiceLine::new(
        booking.id,
        core_kernel::ServiceId::new(),
        2,
        usd(dec!(15.00)),
        Utc::now(),
    )
    .unwrap();

    let total = quote_total(room_type.base_price, &period, &[breakfast]);
    assert_eq!(total, usd(dec!(230.00)));
}

#[test]
fn availability_scan_returns_only_free_rooms() {
    let room_type = RoomType::new("Standard Double", usd(dec!(100.00)), 2).unwrap();
    let r101 = Room::new("R101", room_type.id, 1).unwrap();
    let r102 = Room::new("R102", room_type.id, 1).unwrap();
    let r103 = Room::new("R103", room_type.id, 1).unwrap();
    let rooms = vec![r101.clone(), r102.clone(), r103.clone()];

    let bookings = vec![
        book(&r101, &room_type, date(2025, 1, 1), date(2025, 1, 3)),
        book(&r102, &room_type, date(2025, 1, 2), date(2025, 1, 5)),
    ];

    let free = find_available_rooms(&rooms, &bookings, &stay(date(2025, 1, 2), date(2025, 1, 3)));
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].id, r103.id);

    // After both stays end every room is free again
    let later = find_available_rooms(&rooms, &bookings, &stay(date(2025, 1, 5), date(2025, 1, 7)));
    assert_eq!(later.len(), 3);
}

#[test]
fn deposit_reduces_remaining_balance() {
    let (_, room) = standard_room();
    let booking = Booking::new(
        CustomerId::new(),
        room.id,
        stay(date(2025, 1, 1), date(2025, 1, 3)),
        2,
        usd(dec!(200.00)),
        usd(dec!(50.00)),
    )
    .unwrap();

    assert_eq!(booking.remaining_balance(), usd(dec!(150.00)));
}
