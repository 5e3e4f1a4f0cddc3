//! Booking service line items

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, BookingServiceId, Money, ServiceId};
use crate::error::BookingError;

/// A service consumed during a booking
///
/// The price is a snapshot of the service's list price at the moment the
/// line was recorded; it never changes afterwards, even if the service is
/// re-priced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingServiceLine {
    /// Unique identifier
    pub id: BookingServiceId,
    /// Booking this line belongs to
    pub booking_id: BookingId,
    /// Service that was consumed
    pub service_id: ServiceId,
    /// Quantity, at least 1
    pub quantity: u32,
    /// Unit price at the time of booking
    pub service_price: Money,
    /// When the service was used
    pub service_date: DateTime<Utc>,
    /// Notes about the usage
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl BookingServiceLine {
    /// Creates a new line item with a snapshot of the current price
    pub fn new(
        booking_id: BookingId,
        service_id: ServiceId,
        quantity: u32,
        service_price: Money,
        service_date: DateTime<Utc>,
    ) -> Result<Self, BookingError> {
        if quantity == 0 {
            return Err(BookingError::Validation(
                "Service quantity must be at least 1".to_string(),
            ));
        }
        if service_price.is_negative() {
            return Err(BookingError::Validation(
                "Service price must not be negative".to_string(),
            ));
        }

        Ok(Self {
            id: BookingServiceId::new_v7(),
            booking_id,
            service_id,
            quantity,
            service_price,
            service_date,
            notes: None,
            created_at: Utc::now(),
        })
    }

    /// Attaches a note
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Total for this line: quantity times the snapshot price
    pub fn total_price(&self) -> Money {
        self.service_price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_price() {
        let line = BookingServiceLine::new(
            BookingId::new(),
            ServiceId::new(),
            3,
            Money::new(dec!(15.50), Currency::USD),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(line.total_price().amount(), dec!(46.50));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let result = BookingServiceLine::new(
            BookingId::new(),
            ServiceId::new(),
            0,
            Money::new(dec!(15.50), Currency::USD),
            Utc::now(),
        );
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = BookingServiceLine::new(
            BookingId::new(),
            ServiceId::new(),
            1,
            Money::new(dec!(-1), Currency::USD),
            Utc::now(),
        );
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }
}
