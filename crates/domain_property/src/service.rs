//! Ancillary services (spa, laundry, room service, ...)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, ServiceId, ServiceTypeId};
use crate::error::PropertyError;

/// A category of services (e.g. Wellness, Food & Beverage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    /// Unique identifier
    pub id: ServiceTypeId,
    /// Name of the category
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl ServiceType {
    /// Creates a new service type
    pub fn new(name: impl Into<String>) -> Result<Self, PropertyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PropertyError::Validation(
                "Service type name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: ServiceTypeId::new_v7(),
            name,
            description: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A bookable service with a current list price
///
/// The price here is the live price; bookings snapshot it into their own
/// line items, so later price changes never rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Unique identifier
    pub id: ServiceId,
    /// Name of the service
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Current price
    pub price: Money,
    /// Category this service belongs to
    pub service_type_id: ServiceTypeId,
    /// Whether the service can currently be booked
    pub is_available: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Creates a new available service
    pub fn new(
        name: impl Into<String>,
        price: Money,
        service_type_id: ServiceTypeId,
    ) -> Result<Self, PropertyError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PropertyError::Validation(
                "Service name must not be empty".to_string(),
            ));
        }
        if price.is_negative() {
            return Err(PropertyError::Validation(
                "Service price must not be negative".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: ServiceId::new_v7(),
            name,
            description: None,
            price,
            service_type_id,
            is_available: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Takes the service off the menu
    pub fn make_unavailable(&mut self) {
        self.is_available = false;
        self.updated_at = Utc::now();
    }

    /// Puts the service back on the menu
    pub fn make_available(&mut self) {
        self.is_available = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_starts_available() {
        let svc = Service::new(
            "Breakfast",
            Money::new(dec!(15), Currency::USD),
            ServiceTypeId::new(),
        )
        .unwrap();
        assert!(svc.is_available);
    }

    #[test]
    fn test_with_description() {
        let svc = Service::new(
            "Breakfast",
            Money::new(dec!(15), Currency::USD),
            ServiceTypeId::new(),
        )
        .unwrap()
        .with_description("Continental buffet");
        assert_eq!(svc.description.as_deref(), Some("Continental buffet"));
    }

    #[test]
    fn test_availability_toggle() {
        let mut svc = Service::new(
            "Spa",
            Money::new(dec!(60), Currency::USD),
            ServiceTypeId::new(),
        )
        .unwrap();

        svc.make_unavailable();
        assert!(!svc.is_available);
        svc.make_available();
        assert!(svc.is_available);
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = Service::new(
            "Laundry",
            Money::new(dec!(-5), Currency::USD),
            ServiceTypeId::new(),
        );
        assert!(matches!(result, Err(PropertyError::Validation(_))));
    }
}
