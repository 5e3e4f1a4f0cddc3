//! Tests for rooms, room types, and the service catalogue

use core_kernel::{Currency, Money};
use domain_property::{PropertyError, Room, RoomStatus, RoomType, Service, ServiceType};
use rust_decimal_macros::dec;

fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

#[test]
fn room_type_carries_rate_and_amenities() {
    let room_type = RoomType::new("Deluxe King", usd(dec!(180.00)), 3)
        .unwrap()
        .with_description("King bed, city view")
        .with_amenity("wifi")
        .with_amenity("minibar");

    assert_eq!(room_type.base_price, usd(dec!(180.00)));
    assert_eq!(room_type.amenities, vec!["wifi", "minibar"]);
    assert!(room_type.fits(2, 1));
    assert!(!room_type.fits(3, 1));
}

#[test]
fn room_status_cycle_for_a_stay() {
    let room_type = RoomType::new("Standard", usd(dec!(100.00)), 2).unwrap();
    let mut room = Room::new("R204", room_type.id, 2).unwrap();
    assert_eq!(room.status, RoomStatus::Available);
    assert!(room.is_sellable());

    room.set_status(RoomStatus::Occupied);
    assert!(!room.is_sellable());

    room.set_status(RoomStatus::Cleaning);
    room.set_status(RoomStatus::Available);
    assert!(room.is_sellable());
}

#[test]
fn maintenance_room_is_not_sellable() {
    let room_type = RoomType::new("Standard", usd(dec!(100.00)), 2).unwrap();
    let mut room = Room::new("R105", room_type.id, 1).unwrap();

    room.set_status(RoomStatus::Maintenance);
    assert!(!room.is_sellable());
}

#[test]
fn blank_names_are_rejected_across_the_catalogue() {
    let room_type = RoomType::new("Standard", usd(dec!(100.00)), 2).unwrap();

    assert!(matches!(
        Room::new("  ", room_type.id, 1),
        Err(PropertyError::Validation(_))
    ));
    assert!(matches!(
        RoomType::new("", usd(dec!(100.00)), 2),
        Err(PropertyError::Validation(_))
    ));
    assert!(matches!(
        ServiceType::new(" "),
        Err(PropertyError::Validation(_))
    ));
}

#[test]
fn service_price_snapshot_is_independent_of_later_changes() {
    let service_type = ServiceType::new("Food & Beverage").unwrap();
    let mut service = Service::new("Breakfast", usd(dec!(15.00)), service_type.id).unwrap();

    let price_at_booking = service.price;
    service.price = usd(dec!(18.00));

    assert_eq!(price_at_booking, usd(dec!(15.00)));
    assert_eq!(service.price, usd(dec!(18.00)));
}

#[test]
fn unavailable_service_keeps_its_price() {
    let service_type = ServiceType::new("Wellness").unwrap();
    let mut service = Service::new("Spa Access", usd(dec!(40.00)), service_type.id).unwrap();

    service.make_unavailable();
    assert!(!service.is_available);
    assert_eq!(service.price, usd(dec!(40.00)));

    service.make_available();
    assert!(service.is_available);
}
