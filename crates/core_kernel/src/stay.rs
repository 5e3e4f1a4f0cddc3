//! Stay periods for date-range handling
//!
//! A stay is a half-open range of calendar dates [check_in, check_out).
//! The checkout day is never occupied, which is what makes same-day
//! turnover work: one guest leaves the morning another arrives.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors related to stay period construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StayError {
    #[error("Invalid stay: check-in {check_in} must be before check-out {check_out}")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },
}

/// A half-open range of nights [check_in, check_out)
///
/// Construction rejects inverted and zero-length ranges; a stay is always
/// at least one night. Two stays overlap iff `a.check_in < b.check_out`
/// and `b.check_in < a.check_out` (strict inequalities, so adjacent stays
/// never conflict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayPeriod {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayPeriod {
    /// Creates a new stay period
    ///
    /// Returns `StayError::InvalidRange` when `check_out <= check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, StayError> {
        if check_out <= check_in {
            return Err(StayError::InvalidRange {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date (inclusive)
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date (exclusive)
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights in the stay
    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }

    /// Returns true if the given night is part of this stay
    pub fn contains(&self, night: NaiveDate) -> bool {
        night >= self.check_in && night < self.check_out
    }

    /// Returns true if this stay overlaps another
    pub fn overlaps(&self, other: &StayPeriod) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns true if this stay is immediately before or after another
    pub fn is_adjacent_to(&self, other: &StayPeriod) -> bool {
        self.check_out == other.check_in || other.check_out == self.check_in
    }
}

impl fmt::Display for StayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_valid_stay() {
        let stay = StayPeriod::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
        assert_eq!(stay.nights(), 2);
    }

    #[test]
    fn test_zero_length_rejected() {
        let result = StayPeriod::new(d(2024, 1, 1), d(2024, 1, 1));
        assert!(matches!(result, Err(StayError::InvalidRange { .. })));
    }

    #[test]
    fn test_inverted_rejected() {
        let result = StayPeriod::new(d(2024, 1, 3), d(2024, 1, 1));
        assert!(matches!(result, Err(StayError::InvalidRange { .. })));
    }

    #[test]
    fn test_overlap() {
        let a = StayPeriod::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
        let b = StayPeriod::new(d(2024, 1, 2), d(2024, 1, 4)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_same_day_turnover_does_not_overlap() {
        let leaving = StayPeriod::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
        let arriving = StayPeriod::new(d(2024, 1, 3), d(2024, 1, 5)).unwrap();
        assert!(!leaving.overlaps(&arriving));
        assert!(!arriving.overlaps(&leaving));
        assert!(leaving.is_adjacent_to(&arriving));
    }

    #[test]
    fn test_contains() {
        let stay = StayPeriod::new(d(2024, 1, 1), d(2024, 1, 3)).unwrap();
        assert!(stay.contains(d(2024, 1, 1)));
        assert!(stay.contains(d(2024, 1, 2)));
        // Checkout day is not an occupied night
        assert!(!stay.contains(d(2024, 1, 3)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn stay_strategy() -> impl Strategy<Value = StayPeriod> {
        (0i64..3000, 1i64..60).prop_map(|(start, len)| {
            let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let check_in = epoch + chrono::Days::new(start as u64);
            let check_out = check_in + chrono::Days::new(len as u64);
            StayPeriod::new(check_in, check_out).unwrap()
        })
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in stay_strategy(), b in stay_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn adjacent_stays_never_overlap(a in stay_strategy(), b in stay_strategy()) {
            if a.is_adjacent_to(&b) {
                prop_assert!(!a.overlaps(&b));
            }
        }

        #[test]
        fn stay_always_has_a_night(stay in stay_strategy()) {
            prop_assert!(stay.nights() >= 1);
            prop_assert!(stay.contains(stay.check_in()));
            prop_assert!(!stay.contains(stay.check_out()));
        }
    }
}
