//! Customer entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::CustomerId;
use crate::error::GuestError;

/// A hotel customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone_number: String,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// ID card or passport number
    pub identification_number: String,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        identification_number: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Result<Self, GuestError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let email = email.into();
        let identification_number = identification_number.into();

        if first_name.trim().is_empty() || last_name.trim().is_empty() {
            return Err(GuestError::Validation(
                "Customer name must not be empty".to_string(),
            ));
        }
        if !email.contains('@') || !email.contains('.') {
            return Err(GuestError::Validation(format!(
                "Invalid email format: {}",
                email
            )));
        }
        if identification_number.trim().is_empty() {
            return Err(GuestError::Validation(
                "Identification number is required".to_string(),
            ));
        }
        if date_of_birth >= Utc::now().date_naive() {
            return Err(GuestError::Validation(
                "Date of birth must be in the past".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: CustomerId::new_v7(),
            first_name,
            last_name,
            email,
            phone_number: phone_number.into(),
            address: None,
            city: None,
            country: None,
            postal_code: None,
            identification_number,
            date_of_birth,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the postal address
    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        self.address = Some(address.into());
        self.city = Some(city.into());
        self.country = Some(country.into());
        self.postal_code = Some(postal_code.into());
        self
    }

    /// Returns the full name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 5, 20).unwrap()
    }

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new(
            "Ada",
            "Lovelace",
            "ada@example.com",
            "+44 20 7946 0958",
            "P1234567",
            dob(),
        )
        .unwrap();

        assert_eq!(customer.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = Customer::new("Ada", "Lovelace", "not-an-email", "", "P1", dob());
        assert!(matches!(result, Err(GuestError::Validation(_))));
    }

    #[test]
    fn test_missing_identification_rejected() {
        let result = Customer::new("Ada", "Lovelace", "ada@example.com", "", "  ", dob());
        assert!(matches!(result, Err(GuestError::Validation(_))));
    }

    #[test]
    fn test_future_date_of_birth_rejected() {
        let future = Utc::now().date_naive() + chrono::Days::new(1);
        let result = Customer::new("Ada", "Lovelace", "ada@example.com", "", "P1", future);
        assert!(matches!(result, Err(GuestError::Validation(_))));
    }
}
