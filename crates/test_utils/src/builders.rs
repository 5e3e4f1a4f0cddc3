//! Test Data Builders
//!
//! Provides builder patterns for constructing domain entities with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::{NaiveDate, Utc};
use core_kernel::{CustomerId, Money, RoomId, RoomTypeId, StayPeriod};
use domain_booking::Booking;
use domain_guest::Customer;
use domain_property::{Room, RoomType};
use rust_decimal_macros::dec;

use crate::fixtures::{IdFixtures, MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for constructing test room types
pub struct TestRoomTypeBuilder {
    name: String,
    base_price: Money,
    max_occupancy: u32,
    amenities: Vec<String>,
}

impl Default for TestRoomTypeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoomTypeBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: StringFixtures::room_type_name().to_string(),
            base_price: MoneyFixtures::usd_100(),
            max_occupancy: 2,
            amenities: vec!["wifi".to_string()],
        }
    }

    /// Sets the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the nightly base price
    pub fn with_base_price(mut self, price: Money) -> Self {
        self.base_price = price;
        self
    }

    /// Sets the maximum occupancy
    pub fn with_max_occupancy(mut self, occupancy: u32) -> Self {
        self.max_occupancy = occupancy;
        self
    }

    /// Adds an amenity
    pub fn with_amenity(mut self, amenity: impl Into<String>) -> Self {
        self.amenities.push(amenity.into());
        self
    }

    /// A suite variant with a higher rate and occupancy
    pub fn suite() -> Self {
        Self::new()
            .with_name("Executive Suite")
            .with_base_price(MoneyFixtures::usd_suite_rate())
            .with_max_occupancy(4)
    }

    /// Builds the room type
    pub fn build(self) -> RoomType {
        let mut room_type = RoomType::new(self.name, self.base_price, self.max_occupancy)
            .expect("Test room type should be valid");
        for amenity in self.amenities {
            room_type = room_type.with_amenity(amenity);
        }
        room_type
    }
}

/// Builder for constructing test rooms
pub struct TestRoomBuilder {
    name: String,
    room_type_id: RoomTypeId,
    floor: i32,
}

impl Default for TestRoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoomBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            name: StringFixtures::room_name().to_string(),
            room_type_id: IdFixtures::room_type_id(),
            floor: 1,
        }
    }

    /// Sets the room name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the room type
    pub fn with_room_type_id(mut self, id: RoomTypeId) -> Self {
        self.room_type_id = id;
        self
    }

    /// Sets the floor
    pub fn with_floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    /// Builds the room
    pub fn build(self) -> Room {
        Room::new(self.name, self.room_type_id, self.floor).expect("Test room should be valid")
    }
}

/// Builder for constructing test customers
pub struct TestCustomerBuilder {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    identification_number: String,
    date_of_birth: NaiveDate,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            first_name: StringFixtures::first_name().to_string(),
            last_name: StringFixtures::last_name().to_string(),
            email: StringFixtures::email().to_string(),
            phone: StringFixtures::phone().to_string(),
            identification_number: StringFixtures::identification_number().to_string(),
            date_of_birth: TemporalFixtures::date_of_birth_35(),
        }
    }

    /// Sets the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = name.into();
        self
    }

    /// Sets the last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = name.into();
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the date of birth
    pub fn with_date_of_birth(mut self, dob: NaiveDate) -> Self {
        self.date_of_birth = dob;
        self
    }

    /// Sets the age (calculates DOB from current date)
    pub fn with_age(mut self, age: u32) -> Self {
        let today = Utc::now().date_naive();
        self.date_of_birth = today - chrono::Duration::days(age as i64 * 365);
        self
    }

    /// Builds the customer
    pub fn build(self) -> Customer {
        Customer::new(
            self.first_name,
            self.last_name,
            self.email,
            self.phone,
            self.identification_number,
            self.date_of_birth,
        )
        .expect("Test customer should be valid")
    }
}

/// Builder for constructing test bookings
pub struct TestBookingBuilder {
    customer_id: CustomerId,
    room_id: RoomId,
    stay: StayPeriod,
    adults: u32,
    children: u32,
    total_price: Money,
    deposit_amount: Money,
}

impl Default for TestBookingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBookingBuilder {
    /// Creates a new builder for the standard two-night stay
    pub fn new() -> Self {
        Self {
            customer_id: IdFixtures::customer_id(),
            room_id: IdFixtures::room_id(),
            stay: TemporalFixtures::two_night_stay(),
            adults: 2,
            children: 0,
            total_price: MoneyFixtures::usd_200(),
            deposit_amount: MoneyFixtures::usd_zero(),
        }
    }

    /// Sets the customer
    pub fn with_customer_id(mut self, id: CustomerId) -> Self {
        self.customer_id = id;
        self
    }

    /// Sets the room
    pub fn with_room_id(mut self, id: RoomId) -> Self {
        self.room_id = id;
        self
    }

    /// Sets the stay period
    pub fn with_stay(mut self, stay: StayPeriod) -> Self {
        self.stay = stay;
        self
    }

    /// Sets the party size
    pub fn with_guests(mut self, adults: u32, children: u32) -> Self {
        self.adults = adults;
        self.children = children;
        self
    }

    /// Sets the total price
    pub fn with_total_price(mut self, price: Money) -> Self {
        self.total_price = price;
        self
    }

    /// Sets the deposit
    pub fn with_deposit(mut self, deposit: Money) -> Self {
        self.deposit_amount = deposit;
        self
    }

    /// Builds the booking
    pub fn build(self) -> Booking {
        Booking::new(
            self.customer_id,
            self.room_id,
            self.stay,
            self.adults,
            self.total_price,
            self.deposit_amount,
        )
        .expect("Test booking should be valid")
        .with_children(self.children)
    }
}

/// Builder for constructing test bills
pub struct TestBillBuilder {
    subtotal: Money,
    tax_amount: Money,
    discount_amount: Money,
}

impl Default for TestBillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBillBuilder {
    /// Creates a new builder with the standard charge breakdown
    pub fn new() -> Self {
        Self {
            subtotal: MoneyFixtures::usd_100(),
            tax_amount: Money::new(dec!(10.00), core_kernel::Currency::USD),
            discount_amount: Money::new(dec!(5.00), core_kernel::Currency::USD),
        }
    }

    /// Sets the subtotal
    pub fn with_subtotal(mut self, subtotal: Money) -> Self {
        self.subtotal = subtotal;
        self
    }

    /// Sets the tax amount
    pub fn with_tax(mut self, tax: Money) -> Self {
        self.tax_amount = tax;
        self
    }

    /// Sets the discount
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount_amount = discount;
        self
    }

    /// Builds the bill against the fixture booking and customer
    pub fn build(self) -> domain_billing::Bill {
        domain_billing::Bill::for_booking(
            IdFixtures::booking_id(),
            IdFixtures::customer_id(),
            IdFixtures::user_id(),
            self.subtotal,
            self.tax_amount,
            self.discount_amount,
            TemporalFixtures::due_date(),
        )
        .expect("Test bill should be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_booking_builder_defaults() {
        let booking = TestBookingBuilder::new().build();
        assert_eq!(booking.nights(), 2);
        assert!(booking.total_price.amount() > Decimal::ZERO);
    }

    #[test]
    fn test_room_type_builder_suite() {
        let suite = TestRoomTypeBuilder::suite().build();
        assert_eq!(suite.max_occupancy, 4);
        assert!(suite.base_price > MoneyFixtures::usd_100());
    }

    #[test]
    fn test_customer_builder_age() {
        let customer = TestCustomerBuilder::new().with_age(30).build();

        let age_days = (Utc::now().date_naive() - customer.date_of_birth).num_days();
        let age_years = age_days / 365;
        assert_eq!(age_years, 30);
    }

    #[test]
    fn test_bill_builder_total() {
        let bill = TestBillBuilder::new().build();
        assert_eq!(bill.total_amount().amount(), Decimal::new(10500, 2));
    }
}
