//! Billing handlers
//!
//! A bill's subtotal is derived from its booking at creation time: the
//! agreed booking price plus every service line consumed during the stay.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{BillId, BookingId, CustomerId, Money, UserId};
use domain_billing::Bill;
use domain_staff::Capability;
use infra_db::{BillRepository, BookingRepository, ServiceRepository};

use crate::auth::Claims;
use crate::dto::bills::*;
use crate::error::ApiError;
use crate::handlers::require;
use crate::AppState;

const DEFAULT_PAYMENT_TERM_DAYS: i64 = 14;

/// Issues a bill for a booking
pub async fn create_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateBillRequest>,
) -> Result<(StatusCode, Json<BillResponse>), ApiError> {
    require(&claims, Capability::ManageBilling)?;
    request.validate()?;

    let bookings = BookingRepository::new(state.pool.clone());
    let booking = bookings
        .get_by_id(BookingId::from_uuid(request.booking_id))
        .await?;

    let services = ServiceRepository::new(state.pool.clone());
    let lines = services.find_booking_services(booking.id).await?;

    let currency = booking.total_price.currency();
    let subtotal = lines
        .iter()
        .fold(booking.total_price, |acc, line| acc + line.total_price());

    let due_date = request
        .due_date
        .unwrap_or_else(|| Utc::now() + Duration::days(DEFAULT_PAYMENT_TERM_DAYS));

    // The authenticated staff member is the issuer of record.
    let issued_by = Uuid::parse_str(&claims.sub)
        .map(UserId::from_uuid)
        .map_err(|_| ApiError::Unauthorized)?;

    let mut bill = Bill::for_booking(
        booking.id,
        booking.customer_id,
        issued_by,
        subtotal,
        Money::new(request.tax_amount, currency),
        Money::new(request.discount_amount, currency),
        due_date,
    )?;
    if let Some(notes) = request.notes {
        bill = bill.with_notes(notes);
    }

    let repo = BillRepository::new(state.pool.clone());
    repo.create(&bill).await?;

    tracing::info!(bill_number = %bill.bill_number, "Bill issued");
    Ok((StatusCode::CREATED, Json(bill.into())))
}

/// Lists bills, optionally filtered
pub async fn list_bills(
    State(state): State<AppState>,
    Query(query): Query<BillListQuery>,
) -> Result<Json<Vec<BillResponse>>, ApiError> {
    let repo = BillRepository::new(state.pool.clone());

    let bills = if let Some(number) = query.number.as_deref() {
        repo.find_by_number(number).await?.into_iter().collect()
    } else if let Some(booking_id) = query.booking_id {
        repo.find_by_booking(BookingId::from_uuid(booking_id))
            .await?
            .into_iter()
            .collect()
    } else if let Some(customer_id) = query.customer_id {
        repo.find_by_customer(CustomerId::from_uuid(customer_id))
            .await?
    } else if query.overdue {
        repo.find_overdue(Utc::now()).await?
    } else if query.unpaid {
        repo.find_unpaid().await?
    } else {
        return Err(ApiError::BadRequest(
            "Provide a filter: customer_id, booking_id, unpaid or overdue".to_string(),
        ));
    };

    Ok(Json(bills.into_iter().map(BillResponse::from).collect()))
}

/// Gets a bill by id
pub async fn get_bill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BillResponse>, ApiError> {
    let repo = BillRepository::new(state.pool.clone());
    let bill = repo.get_by_id(BillId::from_uuid(id)).await?;
    Ok(Json(bill.into()))
}

/// Records a payment against a bill
pub async fn record_payment(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<BillResponse>, ApiError> {
    require(&claims, Capability::ManageBilling)?;

    let method = parse_payment_method(&request.method).ok_or_else(|| {
        ApiError::BadRequest(format!("Unknown payment method: {}", request.method))
    })?;

    let repo = BillRepository::new(state.pool.clone());
    let mut bill = repo.get_by_id(BillId::from_uuid(id)).await?;

    let amount = Money::new(request.amount, bill.subtotal.currency());
    bill.record_payment(amount, method, Utc::now())?;

    // The domain call appended the record; persist it with the new head.
    let record = bill
        .payments
        .last()
        .cloned()
        .ok_or_else(|| ApiError::Internal("Payment history is empty".to_string()))?;
    repo.record_payment(&bill, &record).await?;

    tracing::info!(
        bill_number = %bill.bill_number,
        amount = %request.amount,
        "Payment recorded"
    );
    Ok(Json(bill.into()))
}

/// Sends a draft bill to the customer
pub async fn send_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BillResponse>, ApiError> {
    require(&claims, Capability::ManageBilling)?;

    let repo = BillRepository::new(state.pool.clone());
    let mut bill = repo.get_by_id(BillId::from_uuid(id)).await?;

    bill.send()?;
    repo.update(&bill).await?;
    Ok(Json(bill.into()))
}

/// Cancels an unpaid bill
pub async fn cancel_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BillResponse>, ApiError> {
    require(&claims, Capability::ManageBilling)?;

    let repo = BillRepository::new(state.pool.clone());
    let mut bill = repo.get_by_id(BillId::from_uuid(id)).await?;

    bill.cancel()?;
    repo.update(&bill).await?;
    Ok(Json(bill.into()))
}

/// Refunds a settled bill
pub async fn refund_bill(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<BillResponse>, ApiError> {
    require(&claims, Capability::ManageBilling)?;

    let repo = BillRepository::new(state.pool.clone());
    let mut bill = repo.get_by_id(BillId::from_uuid(id)).await?;

    bill.refund()?;
    repo.update(&bill).await?;
    Ok(Json(bill.into()))
}
