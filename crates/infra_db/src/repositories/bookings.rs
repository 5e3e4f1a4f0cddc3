//! Booking repository
//!
//! Booking creation is the one place where correctness depends on the
//! database: the availability check and the insert run inside a single
//! transaction holding a row lock on the room, and the exclusion
//! constraint on the bookings table backstops anything that slips past.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use core_kernel::{BookingId, CustomerId, Money, RoomId, StayPeriod};
use domain_booking::{generate_reference_number, Booking, BookingStatus};
use domain_property::RoomStatus;

use crate::error::DatabaseError;
use crate::repositories::rooms::{currency_from_db, room_status_to_db};

/// Statuses that hold the room, as stored
const BLOCKING_STATUSES: [&str; 3] = ["confirmed", "checked_in", "on_hold"];

/// How many times to retry a colliding reference number
const REFERENCE_RETRIES: u32 = 3;

/// Repository for bookings
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    booking_id: Uuid,
    reference_number: String,
    customer_id: Uuid,
    room_id: Uuid,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    actual_check_in: Option<DateTime<Utc>>,
    actual_check_out: Option<DateTime<Utc>>,
    adults: i32,
    children: i32,
    special_requests: Option<String>,
    total_price: Decimal,
    deposit_amount: Decimal,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub(crate) fn booking_status_to_db(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::CheckedIn => "checked_in",
        BookingStatus::CheckedOut => "checked_out",
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::OnHold => "on_hold",
        BookingStatus::NoShow => "no_show",
    }
}

pub(crate) fn booking_status_from_db(status: &str) -> Result<BookingStatus, DatabaseError> {
    match status {
        "confirmed" => Ok(BookingStatus::Confirmed),
        "checked_in" => Ok(BookingStatus::CheckedIn),
        "checked_out" => Ok(BookingStatus::CheckedOut),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "on_hold" => Ok(BookingStatus::OnHold),
        "no_show" => Ok(BookingStatus::NoShow),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown booking status '{other}'"
        ))),
    }
}

impl TryFrom<BookingRow> for Booking {
    type Error = DatabaseError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let stay = StayPeriod::new(row.check_in_date, row.check_out_date)
            .map_err(|e| DatabaseError::CorruptRow(format!("bad stay period: {e}")))?;
        let currency = currency_from_db(&row.currency)?;

        Ok(Booking {
            id: BookingId::from_uuid(row.booking_id),
            reference_number: row.reference_number,
            customer_id: CustomerId::from_uuid(row.customer_id),
            room_id: RoomId::from_uuid(row.room_id),
            stay,
            actual_check_in: row.actual_check_in,
            actual_check_out: row.actual_check_out,
            adults: row.adults as u32,
            children: row.children as u32,
            special_requests: row.special_requests,
            total_price: Money::new(row.total_price, currency),
            deposit_amount: Money::new(row.deposit_amount, currency),
            status: booking_status_from_db(&row.status)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const BOOKING_COLUMNS: &str = "booking_id, reference_number, customer_id, room_id, \
     check_in_date, check_out_date, actual_check_in, actual_check_out, adults, children, \
     special_requests, total_price, deposit_amount, currency, status, created_at, updated_at";

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a booking by its identifier
    pub async fn get_by_id(&self, booking_id: BookingId) -> Result<Booking, DatabaseError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE booking_id = $1"
        ))
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Booking", booking_id))?;

        row.try_into()
    }

    /// Retrieves all bookings, newest first
    pub async fn list(&self) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Retrieves a booking by its reference number
    pub async fn find_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Booking>, DatabaseError> {
        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE reference_number = $1"
        ))
        .bind(reference)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Booking::try_from).transpose()
    }

    /// Retrieves all bookings for a customer, newest first
    pub async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE customer_id = $1 \
             ORDER BY check_in_date DESC"
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Retrieves all bookings for a room, newest first
    pub async fn find_by_room(&self, room_id: RoomId) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE room_id = $1 \
             ORDER BY check_in_date DESC"
        ))
        .bind(room_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Retrieves all bookings in the given status
    pub async fn find_by_status(
        &self,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = $1 \
             ORDER BY check_in_date"
        ))
        .bind(booking_status_to_db(status))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Retrieves bookings whose stay overlaps the given period
    pub async fn find_in_period(&self, stay: &StayPeriod) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE check_in_date < $2 AND check_out_date > $1 \
             ORDER BY check_in_date"
        ))
        .bind(stay.check_in())
        .bind(stay.check_out())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Retrieves confirmed bookings arriving on the given date
    pub async fn find_arrivals(&self, date: NaiveDate) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE check_in_date = $1 AND status IN ('confirmed', 'on_hold') \
             ORDER BY reference_number"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Retrieves checked-in bookings due to leave on the given date
    pub async fn find_departures(&self, date: NaiveDate) -> Result<Vec<Booking>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE check_out_date = $1 AND status = 'checked_in' \
             ORDER BY reference_number"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    /// Checks whether a room is free for a stay
    ///
    /// Runs the same half-open overlap predicate as the in-memory checker.
    /// Outside of `create` this is advisory; the transaction in `create`
    /// re-runs it under a lock before inserting.
    pub async fn is_room_available(
        &self,
        room_id: RoomId,
        stay: &StayPeriod,
        exclude: Option<BookingId>,
    ) -> Result<bool, DatabaseError> {
        let (conflicts,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM bookings \
             WHERE room_id = $1 \
               AND check_in_date < $3 AND check_out_date > $2 \
               AND status = ANY($4) \
               AND ($5::uuid IS NULL OR booking_id <> $5))",
        )
        .bind(room_id.as_uuid())
        .bind(stay.check_in())
        .bind(stay.check_out())
        .bind(&BLOCKING_STATUSES[..])
        .bind(exclude.map(Uuid::from))
        .fetch_one(&self.pool)
        .await?;

        Ok(!conflicts)
    }

    /// Lists the room ids free for a stay
    pub async fn find_available_room_ids(
        &self,
        stay: &StayPeriod,
    ) -> Result<Vec<RoomId>, DatabaseError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT r.room_id FROM rooms r \
             WHERE r.status NOT IN ('maintenance') \
               AND NOT EXISTS (SELECT 1 FROM bookings b \
                 WHERE b.room_id = r.room_id \
                   AND b.check_in_date < $2 AND b.check_out_date > $1 \
                   AND b.status = ANY($3)) \
             ORDER BY r.room_number",
        )
        .bind(stay.check_in())
        .bind(stay.check_out())
        .bind(&BLOCKING_STATUSES[..])
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| RoomId::from_uuid(id)).collect())
    }

    /// Creates a booking if the room is free for the stay
    ///
    /// Locks the room row, re-checks for conflicts, then inserts, all in
    /// one transaction. Two racing creations serialize on the lock; if a
    /// conflict appears anyway the exclusion constraint rejects the insert
    /// and the error maps to `BookingOverlap`.
    ///
    /// A colliding reference number aborts the transaction, so each retry
    /// starts a fresh one; the reference that finally committed is written
    /// back into the booking.
    pub async fn create(&self, booking: &mut Booking) -> Result<(), DatabaseError> {
        for attempt in 0..=REFERENCE_RETRIES {
            match self.try_create(booking).await {
                Ok(()) => {
                    tracing::info!(
                        reference = %booking.reference_number,
                        room = %booking.room_id,
                        "booking created"
                    );
                    return Ok(());
                }
                Err(DatabaseError::DuplicateEntry(msg))
                    if msg.contains("reference_number") && attempt < REFERENCE_RETRIES =>
                {
                    booking.reference_number = generate_reference_number();
                }
                Err(e) => return Err(e),
            }
        }

        Err(DatabaseError::duplicate(
            "Booking",
            "reference_number",
            booking.reference_number.clone(),
        ))
    }

    async fn try_create(&self, booking: &Booking) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT room_id FROM rooms WHERE room_id = $1 FOR UPDATE")
                .bind(booking.room_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(DatabaseError::not_found("Room", booking.room_id));
        }

        let (conflicts,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM bookings \
             WHERE room_id = $1 \
               AND check_in_date < $3 AND check_out_date > $2 \
               AND status = ANY($4))",
        )
        .bind(booking.room_id.as_uuid())
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(&BLOCKING_STATUSES[..])
        .fetch_one(&mut *tx)
        .await?;

        if conflicts {
            return Err(DatabaseError::BookingOverlap(format!(
                "room {} is already booked between {} and {}",
                booking.room_id,
                booking.stay.check_in(),
                booking.stay.check_out()
            )));
        }

        insert_booking(&mut tx, booking).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Persists a booking's mutable state
    pub async fn update(&self, booking: &Booking) -> Result<(), DatabaseError> {
        let result = update_booking(&self.pool, booking).await?;
        if result == 0 {
            return Err(DatabaseError::not_found("Booking", booking.id));
        }
        Ok(())
    }

    /// Moves a booking to new dates or a different room if it is free
    ///
    /// Mirrors `create`: locks the room row and re-runs the conflict query,
    /// excluding the booking itself, before writing the new stay.
    pub async fn reschedule(&self, booking: &Booking) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT room_id FROM rooms WHERE room_id = $1 FOR UPDATE")
                .bind(booking.room_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(DatabaseError::not_found("Room", booking.room_id));
        }

        let (conflicts,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM bookings \
             WHERE room_id = $1 \
               AND check_in_date < $3 AND check_out_date > $2 \
               AND status = ANY($4) \
               AND booking_id <> $5)",
        )
        .bind(booking.room_id.as_uuid())
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(&BLOCKING_STATUSES[..])
        .bind(booking.id.as_uuid())
        .fetch_one(&mut *tx)
        .await?;

        if conflicts {
            return Err(DatabaseError::BookingOverlap(format!(
                "room {} is already booked between {} and {}",
                booking.room_id,
                booking.stay.check_in(),
                booking.stay.check_out()
            )));
        }

        let rows = sqlx::query(
            "UPDATE bookings SET room_id = $2, check_in_date = $3, check_out_date = $4, \
             adults = $5, children = $6, special_requests = $7, total_price = $8, \
             updated_at = $9 \
             WHERE booking_id = $1",
        )
        .bind(booking.id.as_uuid())
        .bind(booking.room_id.as_uuid())
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(booking.adults as i32)
        .bind(booking.children as i32)
        .bind(&booking.special_requests)
        .bind(booking.total_price.amount())
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if rows == 0 {
            return Err(DatabaseError::not_found("Booking", booking.id));
        }

        tx.commit().await?;
        tracing::info!(
            reference = %booking.reference_number,
            room = %booking.room_id,
            "booking rescheduled"
        );
        Ok(())
    }

    /// Persists a lifecycle transition together with the room status it
    /// implies, atomically
    ///
    /// Check-in marks the room occupied and check-out sends it to cleaning;
    /// both effects land in the same transaction as the booking update.
    pub async fn update_with_room_status(
        &self,
        booking: &Booking,
        room_status: RoomStatus,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let rows = sqlx::query(
            "UPDATE bookings SET status = $2, actual_check_in = $3, actual_check_out = $4, \
             updated_at = $5 WHERE booking_id = $1",
        )
        .bind(booking.id.as_uuid())
        .bind(booking_status_to_db(booking.status))
        .bind(booking.actual_check_in)
        .bind(booking.actual_check_out)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if rows == 0 {
            return Err(DatabaseError::not_found("Booking", booking.id));
        }

        sqlx::query("UPDATE rooms SET status = $2, updated_at = $3 WHERE room_id = $1")
            .bind(booking.room_id.as_uuid())
            .bind(room_status_to_db(room_status))
            .bind(booking.updated_at)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_booking(
    tx: &mut Transaction<'_, Postgres>,
    booking: &Booking,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO bookings (booking_id, reference_number, customer_id, room_id, \
         check_in_date, check_out_date, actual_check_in, actual_check_out, adults, children, \
         special_requests, total_price, deposit_amount, currency, status, created_at, \
         updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)",
    )
    .bind(booking.id.as_uuid())
    .bind(&booking.reference_number)
    .bind(booking.customer_id.as_uuid())
    .bind(booking.room_id.as_uuid())
    .bind(booking.stay.check_in())
    .bind(booking.stay.check_out())
    .bind(booking.actual_check_in)
    .bind(booking.actual_check_out)
    .bind(booking.adults as i32)
    .bind(booking.children as i32)
    .bind(&booking.special_requests)
    .bind(booking.total_price.amount())
    .bind(booking.deposit_amount.amount())
    .bind(booking.total_price.currency().code())
    .bind(booking_status_to_db(booking.status))
    .bind(booking.created_at)
    .bind(booking.updated_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn update_booking(pool: &PgPool, booking: &Booking) -> Result<u64, DatabaseError> {
    let result = sqlx::query(
        "UPDATE bookings SET check_in_date = $2, check_out_date = $3, \
         actual_check_in = $4, actual_check_out = $5, adults = $6, children = $7, \
         special_requests = $8, total_price = $9, deposit_amount = $10, status = $11, \
         updated_at = $12 \
         WHERE booking_id = $1",
    )
    .bind(booking.id.as_uuid())
    .bind(booking.stay.check_in())
    .bind(booking.stay.check_out())
    .bind(booking.actual_check_in)
    .bind(booking.actual_check_out)
    .bind(booking.adults as i32)
    .bind(booking.children as i32)
    .bind(&booking.special_requests)
    .bind(booking.total_price.amount())
    .bind(booking.deposit_amount.amount())
    .bind(booking_status_to_db(booking.status))
    .bind(booking.updated_at)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
