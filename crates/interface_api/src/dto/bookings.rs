//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_booking::{Booking, BookingServiceLine, BookingStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub customer_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, max = 10))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 10))]
    pub children: u32,
    pub special_requests: Option<String>,
    /// Agreed total; when omitted the nightly base price of the room's
    /// type times the number of nights is charged
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    /// New room; omitted to keep the current one
    pub room_id: Option<Uuid>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[validate(range(min = 1, max = 10))]
    pub adults: u32,
    #[serde(default)]
    #[validate(range(max = 10))]
    pub children: u32,
    pub special_requests: Option<String>,
    /// Agreed total; when omitted the stay is re-quoted at the room's
    /// nightly base price
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<String>,
    pub customer_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub reference: Option<String>,
    /// Bookings arriving on this date
    pub arrival_date: Option<NaiveDate>,
    /// Bookings departing on this date
    pub departure_date: Option<NaiveDate>,
    /// Start of a period filter; paired with `to`
    pub from: Option<NaiveDate>,
    /// End of a period filter; paired with `from`
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct RoomAvailabilityQuery {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Booking to leave out of the conflict set, for date changes
    pub exclude_booking_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RoomAvailabilityResponse {
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub available: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddBookingServiceRequest {
    pub service_id: Uuid,
    #[validate(range(min = 1, max = 100))]
    pub quantity: u32,
    pub service_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub reference_number: String,
    pub customer_id: Uuid,
    pub room_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: u32,
    pub actual_check_in: Option<DateTime<Utc>>,
    pub actual_check_out: Option<DateTime<Utc>>,
    pub adults: u32,
    pub children: u32,
    pub special_requests: Option<String>,
    pub total_price: Decimal,
    pub deposit_amount: Decimal,
    pub currency: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingServiceResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub service_id: Uuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub currency: String,
    pub service_date: DateTime<Utc>,
    pub notes: Option<String>,
}

pub fn booking_status_name(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::CheckedIn => "checked_in",
        BookingStatus::CheckedOut => "checked_out",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::OnHold => "on_hold",
        BookingStatus::NoShow => "no_show",
    }
}

pub fn parse_booking_status(status: &str) -> Option<BookingStatus> {
    match status {
        "confirmed" => Some(BookingStatus::Confirmed),
        "checked_in" => Some(BookingStatus::CheckedIn),
        "checked_out" => Some(BookingStatus::CheckedOut),
        "cancelled" => Some(BookingStatus::Cancelled),
        "on_hold" => Some(BookingStatus::OnHold),
        "no_show" => Some(BookingStatus::NoShow),
        _ => None,
    }
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id.into(),
            reference_number: b.reference_number,
            customer_id: b.customer_id.into(),
            room_id: b.room_id.into(),
            check_in_date: b.stay.check_in(),
            check_out_date: b.stay.check_out(),
            nights: b.stay.nights(),
            actual_check_in: b.actual_check_in,
            actual_check_out: b.actual_check_out,
            adults: b.adults,
            children: b.children,
            special_requests: b.special_requests,
            total_price: b.total_price.amount(),
            deposit_amount: b.deposit_amount.amount(),
            currency: b.total_price.currency().code().to_string(),
            status: booking_status_name(b.status).to_string(),
            created_at: b.created_at,
        }
    }
}

impl From<BookingServiceLine> for BookingServiceResponse {
    fn from(line: BookingServiceLine) -> Self {
        let total = line.total_price();
        Self {
            id: line.id.into(),
            booking_id: line.booking_id.into(),
            service_id: line.service_id.into(),
            quantity: line.quantity,
            unit_price: line.service_price.amount(),
            total_price: total.amount(),
            currency: line.service_price.currency().code().to_string(),
            service_date: line.service_date,
            notes: line.notes,
        }
    }
}
