//! Room availability rules
//!
//! These are the pure, in-memory versions of the checks; the booking
//! repository runs the same predicate as SQL inside the creation
//! transaction so that check and insert are atomic.

use core_kernel::{BookingId, RoomId, StayPeriod};
use domain_property::Room;

use crate::booking::{Booking, BookingStatus};

/// Returns true if a booking in this status holds the room
///
/// Cancelled, no-show, and checked-out bookings release their nights.
pub fn blocks_availability(status: BookingStatus) -> bool {
    matches!(
        status,
        BookingStatus::Confirmed | BookingStatus::CheckedIn | BookingStatus::OnHold
    )
}

/// Checks whether a room is free for the given stay
///
/// A room is unavailable iff some blocking booking for the same room has
/// an overlapping stay. `exclude` omits one booking from the conflict set,
/// used when moving an existing booking's own dates.
///
/// Invalid stays cannot reach this function: `StayPeriod` construction
/// already rejects them, so a degenerate range is never reported available.
pub fn is_room_available(
    bookings: &[Booking],
    room_id: RoomId,
    stay: &StayPeriod,
    exclude: Option<BookingId>,
) -> bool {
    !bookings.iter().any(|b| {
        b.room_id == room_id
            && Some(b.id) != exclude
            && blocks_availability(b.status)
            && b.stay.overlaps(stay)
    })
}

/// Lists the rooms free for the given stay
pub fn find_available_rooms<'a>(
    rooms: &'a [Room],
    bookings: &[Booking],
    stay: &StayPeriod,
) -> Vec<&'a Room> {
    rooms
        .iter()
        .filter(|room| is_room_available(bookings, room.id, stay, None))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{CustomerId, Currency, Money};
    use rust_decimal_macros::dec;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, day).unwrap()
    }

    fn stay(from: NaiveDate, to: NaiveDate) -> StayPeriod {
        StayPeriod::new(from, to).unwrap()
    }

    fn booking_for(room_id: RoomId, from: NaiveDate, to: NaiveDate) -> Booking {
        Booking::new(
            CustomerId::new(),
            room_id,
            stay(from, to),
            1,
            Money::new(dec!(100), Currency::USD),
            Money::zero(Currency::USD),
        )
        .unwrap()
    }

    #[test]
    fn test_overlapping_confirmed_booking_blocks() {
        let room = RoomId::new();
        let existing = vec![booking_for(room, d(1, 1), d(1, 3))];

        assert!(!is_room_available(
            &existing,
            room,
            &stay(d(1, 2), d(1, 4)),
            None
        ));
    }

    #[test]
    fn test_adjacent_stay_is_available() {
        let room = RoomId::new();
        let existing = vec![booking_for(room, d(1, 1), d(1, 3))];

        assert!(is_room_available(
            &existing,
            room,
            &stay(d(1, 3), d(1, 5)),
            None
        ));
    }

    #[test]
    fn test_released_statuses_do_not_block() {
        let room = RoomId::new();

        let mut cancelled = booking_for(room, d(1, 1), d(1, 3));
        cancelled.cancel().unwrap();

        let mut done = booking_for(room, d(1, 1), d(1, 3));
        done.check_in(chrono::Utc::now()).unwrap();
        done.check_out(chrono::Utc::now()).unwrap();

        let mut no_show = booking_for(room, d(1, 1), d(1, 3));
        no_show.mark_no_show().unwrap();

        let existing = vec![cancelled, done, no_show];
        assert!(is_room_available(
            &existing,
            room,
            &stay(d(1, 2), d(1, 4)),
            None
        ));
    }

    #[test]
    fn test_on_hold_blocks() {
        let room = RoomId::new();
        let mut held = booking_for(room, d(1, 1), d(1, 3));
        held.place_on_hold().unwrap();

        assert!(!is_room_available(
            &[held],
            room,
            &stay(d(1, 2), d(1, 4)),
            None
        ));
    }

    #[test]
    fn test_exclusion_ignores_own_booking() {
        let room = RoomId::new();
        let existing = booking_for(room, d(1, 1), d(1, 3));
        let id = existing.id;

        // Moving the booking onto its own dates must not self-conflict
        assert!(is_room_available(
            &[existing],
            room,
            &stay(d(1, 2), d(1, 4)),
            Some(id)
        ));
    }

    #[test]
    fn test_other_rooms_do_not_interfere() {
        let room_a = RoomId::new();
        let room_b = RoomId::new();
        let existing = vec![booking_for(room_a, d(1, 1), d(1, 3))];

        assert!(is_room_available(
            &existing,
            room_b,
            &stay(d(1, 1), d(1, 3)),
            None
        ));
    }

    #[test]
    fn test_find_available_rooms() {
        use domain_property::{Room, RoomType};
        let rt = RoomType::new("Double", Money::new(dec!(100), Currency::USD), 2).unwrap();
        let r1 = Room::new("R101", rt.id, 1).unwrap();
        let r2 = Room::new("R102", rt.id, 1).unwrap();
        let rooms = vec![r1.clone(), r2.clone()];

        let existing = vec![booking_for(r1.id, d(1, 1), d(1, 3))];

        let free = find_available_rooms(&rooms, &existing, &stay(d(1, 2), d(1, 4)));
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, r2.id);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{CustomerId, Currency, Money};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn stay_strategy() -> impl Strategy<Value = StayPeriod> {
        (0u64..365, 1u64..30).prop_map(|(start, len)| {
            let epoch = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let check_in = epoch + chrono::Days::new(start);
            StayPeriod::new(check_in, check_in + chrono::Days::new(len)).unwrap()
        })
    }

    proptest! {
        #[test]
        fn availability_agrees_with_overlap(a in stay_strategy(), b in stay_strategy()) {
            let room = RoomId::new();
            let existing = Booking::new(
                CustomerId::new(),
                room,
                a,
                1,
                Money::new(dec!(100), Currency::USD),
                Money::zero(Currency::USD),
            ).unwrap();

            let available = is_room_available(&[existing], room, &b, None);
            prop_assert_eq!(available, !a.overlaps(&b));
        }
    }
}
