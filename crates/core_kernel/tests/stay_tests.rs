//! Integration tests for stay periods

use chrono::NaiveDate;
use core_kernel::{StayError, StayPeriod};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn one_night_stay_is_valid() {
    let stay = StayPeriod::new(d(2024, 6, 1), d(2024, 6, 2)).unwrap();
    assert_eq!(stay.nights(), 1);
}

#[test]
fn construction_rejects_degenerate_ranges() {
    assert_eq!(
        StayPeriod::new(d(2024, 6, 1), d(2024, 6, 1)),
        Err(StayError::InvalidRange {
            check_in: d(2024, 6, 1),
            check_out: d(2024, 6, 1),
        })
    );
    assert!(StayPeriod::new(d(2024, 6, 2), d(2024, 6, 1)).is_err());
}

#[test]
fn overlap_cases_from_the_front_desk() {
    let stay = StayPeriod::new(d(2024, 6, 10), d(2024, 6, 14)).unwrap();

    // Fully inside
    let inside = StayPeriod::new(d(2024, 6, 11), d(2024, 6, 13)).unwrap();
    assert!(stay.overlaps(&inside));

    // Straddling the start
    let straddle = StayPeriod::new(d(2024, 6, 8), d(2024, 6, 11)).unwrap();
    assert!(stay.overlaps(&straddle));

    // Covering the whole stay
    let covering = StayPeriod::new(d(2024, 6, 1), d(2024, 6, 30)).unwrap();
    assert!(stay.overlaps(&covering));

    // Back-to-back on either side: no conflict
    let before = StayPeriod::new(d(2024, 6, 7), d(2024, 6, 10)).unwrap();
    let after = StayPeriod::new(d(2024, 6, 14), d(2024, 6, 16)).unwrap();
    assert!(!stay.overlaps(&before));
    assert!(!stay.overlaps(&after));
}

#[test]
fn stays_crossing_month_boundaries() {
    let stay = StayPeriod::new(d(2024, 1, 30), d(2024, 2, 2)).unwrap();
    assert_eq!(stay.nights(), 3);
    assert!(stay.contains(d(2024, 2, 1)));
    assert!(!stay.contains(d(2024, 2, 2)));
}
