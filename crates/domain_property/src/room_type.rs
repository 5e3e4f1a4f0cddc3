//! Room types and nightly pricing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, RoomTypeId};
use crate::error::PropertyError;

/// A category of rooms (e.g. Single, Double, Suite)
///
/// The nightly base price lives here; individual rooms inherit it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    /// Unique identifier
    pub id: RoomTypeId,
    /// Name of the type
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Base price per night
    pub base_price: Money,
    /// Maximum number of guests
    pub max_occupancy: u32,
    /// Amenities available in rooms of this type
    pub amenities: Vec<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl RoomType {
    /// Creates a new room type
    pub fn new(
        name: impl Into<String>,
        base_price: Money,
        max_occupancy: u32,
    ) -> Result<Self, PropertyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PropertyError::Validation(
                "Room type name must not be empty".to_string(),
            ));
        }
        if base_price.is_negative() {
            return Err(PropertyError::Validation(
                "Base price must not be negative".to_string(),
            ));
        }
        if max_occupancy == 0 {
            return Err(PropertyError::Validation(
                "Max occupancy must be at least 1".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: RoomTypeId::new_v7(),
            name,
            description: None,
            base_price,
            max_occupancy,
            amenities: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an amenity
    pub fn with_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenities.push(amenity.into());
        self
    }

    /// Returns true if a party of the given size fits
    pub fn fits(&self, adults: u32, children: u32) -> bool {
        adults
            .checked_add(children)
            .map(|party| party <= self.max_occupancy)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn test_room_type_creation() {
        let rt = RoomType::new("Double", usd(dec!(100)), 2)
            .unwrap()
            .with_amenity("WiFi")
            .with_amenity("Minibar");

        assert_eq!(rt.name, "Double");
        assert_eq!(rt.amenities.len(), 2);
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = RoomType::new("Double", usd(dec!(-1)), 2);
        assert!(matches!(result, Err(PropertyError::Validation(_))));
    }

    #[test]
    fn test_zero_occupancy_rejected() {
        let result = RoomType::new("Double", usd(dec!(100)), 0);
        assert!(matches!(result, Err(PropertyError::Validation(_))));
    }

    #[test]
    fn test_fits_counts_adults_and_children() {
        let rt = RoomType::new("Family", usd(dec!(180)), 4).unwrap();
        assert!(rt.fits(2, 2));
        assert!(!rt.fits(3, 2));
    }

    #[test]
    fn test_fits_rejects_party_sizes_past_u32() {
        let rt = RoomType::new("Family", usd(dec!(180)), 4).unwrap();
        assert!(!rt.fits(1, u32::MAX));
        assert!(!rt.fits(u32::MAX, u32::MAX));
    }
}
