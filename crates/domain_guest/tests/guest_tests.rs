//! Tests for customer registration and contact details

use chrono::NaiveDate;
use domain_guest::{Customer, GuestError};

fn dob() -> NaiveDate {
    NaiveDate::from_ymd_opt(1989, 5, 15).unwrap()
}

fn new_customer() -> Customer {
    Customer::new(
        "Maria",
        "Santos",
        "maria.santos@example.com",
        "+34-600-123-456",
        "X1234567L",
        dob(),
    )
    .unwrap()
}

#[test]
fn full_name_joins_first_and_last() {
    let customer = new_customer();
    assert_eq!(customer.full_name(), "Maria Santos");
}

#[test]
fn address_is_optional_until_provided() {
    let customer = new_customer();
    assert!(customer.address.is_none());
    assert!(customer.city.is_none());

    let with_address = new_customer().with_address("Calle Mayor 1", "Madrid", "Spain", "28013");
    assert_eq!(with_address.address.as_deref(), Some("Calle Mayor 1"));
    assert_eq!(with_address.postal_code.as_deref(), Some("28013"));
}

#[test]
fn email_must_look_like_an_address() {
    let result = Customer::new("Maria", "Santos", "not-an-email", "+34", "X1", dob());
    assert!(matches!(result, Err(GuestError::Validation(_))));
}

#[test]
fn identification_is_required_for_check_in_records() {
    let result = Customer::new(
        "Maria",
        "Santos",
        "maria@example.com",
        "+34",
        "   ",
        dob(),
    );
    assert!(matches!(result, Err(GuestError::Validation(_))));
}

#[test]
fn guests_must_already_be_born() {
    let tomorrow = chrono::Utc::now().date_naive() + chrono::Duration::days(1);
    let result = Customer::new(
        "Maria",
        "Santos",
        "maria@example.com",
        "+34",
        "X1",
        tomorrow,
    );
    assert!(matches!(result, Err(GuestError::Validation(_))));
}

#[test]
fn contact_details_can_change_without_touching_identity() {
    let mut customer = new_customer();
    let id_before = customer.id;

    customer.email = "m.santos@example.org".to_string();
    customer.phone_number = "+34-600-999-888".to_string();

    assert_eq!(customer.id, id_before);
    assert_eq!(customer.identification_number, "X1234567L");
}
