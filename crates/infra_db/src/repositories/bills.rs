//! Bill repository
//!
//! Bills persist their charge components, never the derived total.
//! Recording a payment writes the history row and the updated bill head
//! in one transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use core_kernel::{BillId, BookingId, CustomerId, Money, UserId};
use domain_billing::{generate_bill_number, Bill, BillStatus, PaymentMethod, PaymentRecord};

use crate::error::DatabaseError;
use crate::repositories::rooms::currency_from_db;

/// How many times to retry a colliding bill number
const BILL_NUMBER_RETRIES: u32 = 3;

/// Repository for bills and their payment history
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct BillRow {
    bill_id: Uuid,
    bill_number: String,
    booking_id: Uuid,
    customer_id: Uuid,
    issued_by: Uuid,
    subtotal: Decimal,
    tax_amount: Decimal,
    discount_amount: Decimal,
    paid_amount: Decimal,
    currency: String,
    payment_method: Option<String>,
    status: String,
    issued_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
    paid_date: Option<DateTime<Utc>>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    amount: Decimal,
    currency: String,
    method: String,
    paid_at: DateTime<Utc>,
}

fn bill_status_to_db(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Draft => "draft",
        BillStatus::Sent => "sent",
        BillStatus::PartiallyPaid => "partially_paid",
        BillStatus::Paid => "paid",
        BillStatus::Overdue => "overdue",
        BillStatus::Cancelled => "cancelled",
        BillStatus::Refunded => "refunded",
    }
}

fn bill_status_from_db(status: &str) -> Result<BillStatus, DatabaseError> {
    match status {
        "draft" => Ok(BillStatus::Draft),
        "sent" => Ok(BillStatus::Sent),
        "partially_paid" => Ok(BillStatus::PartiallyPaid),
        "paid" => Ok(BillStatus::Paid),
        "overdue" => Ok(BillStatus::Overdue),
        "cancelled" => Ok(BillStatus::Cancelled),
        "refunded" => Ok(BillStatus::Refunded),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown bill status '{other}'"
        ))),
    }
}

fn payment_method_to_db(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::CreditCard => "credit_card",
        PaymentMethod::DebitCard => "debit_card",
        PaymentMethod::BankTransfer => "bank_transfer",
        PaymentMethod::Check => "check",
        PaymentMethod::MobilePayment => "mobile_payment",
        PaymentMethod::OnlinePayment => "online_payment",
    }
}

fn payment_method_from_db(method: &str) -> Result<PaymentMethod, DatabaseError> {
    match method {
        "cash" => Ok(PaymentMethod::Cash),
        "credit_card" => Ok(PaymentMethod::CreditCard),
        "debit_card" => Ok(PaymentMethod::DebitCard),
        "bank_transfer" => Ok(PaymentMethod::BankTransfer),
        "check" => Ok(PaymentMethod::Check),
        "mobile_payment" => Ok(PaymentMethod::MobilePayment),
        "online_payment" => Ok(PaymentMethod::OnlinePayment),
        other => Err(DatabaseError::CorruptRow(format!(
            "unknown payment method '{other}'"
        ))),
    }
}

fn bill_from_row(row: BillRow, payments: Vec<PaymentRow>) -> Result<Bill, DatabaseError> {
    let currency = currency_from_db(&row.currency)?;
    let payments = payments
        .into_iter()
        .map(|p| {
            Ok(PaymentRecord::new(
                Money::new(p.amount, currency_from_db(&p.currency)?),
                payment_method_from_db(&p.method)?,
                p.paid_at,
            ))
        })
        .collect::<Result<Vec<_>, DatabaseError>>()?;

    Ok(Bill {
        id: BillId::from_uuid(row.bill_id),
        bill_number: row.bill_number,
        booking_id: BookingId::from_uuid(row.booking_id),
        customer_id: CustomerId::from_uuid(row.customer_id),
        issued_by: UserId::from_uuid(row.issued_by),
        subtotal: Money::new(row.subtotal, currency),
        tax_amount: Money::new(row.tax_amount, currency),
        discount_amount: Money::new(row.discount_amount, currency),
        paid_amount: Money::new(row.paid_amount, currency),
        payment_method: row
            .payment_method
            .as_deref()
            .map(payment_method_from_db)
            .transpose()?,
        payments,
        status: bill_status_from_db(&row.status)?,
        issued_date: row.issued_date,
        due_date: row.due_date,
        paid_date: row.paid_date,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

const BILL_COLUMNS: &str = "bill_id, bill_number, booking_id, customer_id, issued_by, \
     subtotal, tax_amount, discount_amount, paid_amount, currency, payment_method, status, \
     issued_date, due_date, paid_date, notes, created_at, updated_at";

impl BillRepository {
    /// Creates a new BillRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a bill with its payment history
    pub async fn get_by_id(&self, bill_id: BillId) -> Result<Bill, DatabaseError> {
        let row = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE bill_id = $1"
        ))
        .bind(bill_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Bill", bill_id))?;

        let payments = self.payments_for(bill_id).await?;
        bill_from_row(row, payments)
    }

    /// Retrieves a bill by its number
    pub async fn find_by_number(&self, number: &str) -> Result<Option<Bill>, DatabaseError> {
        let row = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE bill_number = $1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let payments = self.payments_for(BillId::from_uuid(row.bill_id)).await?;
                Ok(Some(bill_from_row(row, payments)?))
            }
            None => Ok(None),
        }
    }

    /// Retrieves the bill issued for a booking, if any
    pub async fn find_by_booking(
        &self,
        booking_id: BookingId,
    ) -> Result<Option<Bill>, DatabaseError> {
        let row = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE booking_id = $1 \
             ORDER BY issued_date DESC LIMIT 1"
        ))
        .bind(booking_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let payments = self.payments_for(BillId::from_uuid(row.bill_id)).await?;
                Ok(Some(bill_from_row(row, payments)?))
            }
            None => Ok(None),
        }
    }

    /// Retrieves all bills for a customer, newest first
    pub async fn find_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Bill>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills WHERE customer_id = $1 \
             ORDER BY issued_date DESC"
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    /// Retrieves bills that still carry an outstanding balance
    pub async fn find_unpaid(&self) -> Result<Vec<Bill>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills \
             WHERE status IN ('draft', 'sent', 'partially_paid', 'overdue') \
             ORDER BY due_date"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    /// Retrieves unpaid bills whose due date has passed
    pub async fn find_overdue(&self, now: DateTime<Utc>) -> Result<Vec<Bill>, DatabaseError> {
        let rows = sqlx::query_as::<_, BillRow>(&format!(
            "SELECT {BILL_COLUMNS} FROM bills \
             WHERE status IN ('draft', 'sent', 'partially_paid', 'overdue') \
               AND due_date < $1 \
             ORDER BY due_date"
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    /// Inserts a new bill
    ///
    /// A colliding bill number is retried with a fresh one.
    pub async fn create(&self, bill: &Bill) -> Result<(), DatabaseError> {
        let mut number = bill.bill_number.clone();
        for attempt in 0..=BILL_NUMBER_RETRIES {
            match insert_bill(&self.pool, bill, &number).await {
                Ok(()) => {
                    tracing::info!(bill_number = %number, booking = %bill.booking_id, "bill created");
                    return Ok(());
                }
                Err(DatabaseError::DuplicateEntry(msg))
                    if msg.contains("bill_number") && attempt < BILL_NUMBER_RETRIES =>
                {
                    number = generate_bill_number(bill.issued_date);
                }
                Err(e) => return Err(e),
            }
        }

        Err(DatabaseError::duplicate("Bill", "bill_number", number))
    }

    /// Persists a payment: the history row plus the updated bill head
    pub async fn record_payment(
        &self,
        bill: &Bill,
        record: &PaymentRecord,
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        insert_payment(&mut tx, bill.id, record).await?;

        let rows = sqlx::query(
            "UPDATE bills SET paid_amount = $2, payment_method = $3, status = $4, \
             paid_date = $5, updated_at = $6 WHERE bill_id = $1",
        )
        .bind(bill.id.as_uuid())
        .bind(bill.paid_amount.amount())
        .bind(bill.payment_method.map(payment_method_to_db))
        .bind(bill_status_to_db(bill.status))
        .bind(bill.paid_date)
        .bind(bill.updated_at)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if rows == 0 {
            return Err(DatabaseError::not_found("Bill", bill.id));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Persists the bill head after a non-payment change (status, notes)
    pub async fn update(&self, bill: &Bill) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE bills SET subtotal = $2, tax_amount = $3, discount_amount = $4, \
             paid_amount = $5, payment_method = $6, status = $7, due_date = $8, \
             paid_date = $9, notes = $10, updated_at = $11 WHERE bill_id = $1",
        )
        .bind(bill.id.as_uuid())
        .bind(bill.subtotal.amount())
        .bind(bill.tax_amount.amount())
        .bind(bill.discount_amount.amount())
        .bind(bill.paid_amount.amount())
        .bind(bill.payment_method.map(payment_method_to_db))
        .bind(bill_status_to_db(bill.status))
        .bind(bill.due_date)
        .bind(bill.paid_date)
        .bind(&bill.notes)
        .bind(bill.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Bill", bill.id));
        }
        Ok(())
    }

    async fn payments_for(&self, bill_id: BillId) -> Result<Vec<PaymentRow>, DatabaseError> {
        let payments = sqlx::query_as::<_, PaymentRow>(
            "SELECT amount, currency, method, paid_at FROM bill_payments \
             WHERE bill_id = $1 ORDER BY paid_at",
        )
        .bind(bill_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    async fn hydrate(&self, rows: Vec<BillRow>) -> Result<Vec<Bill>, DatabaseError> {
        let mut bills = Vec::with_capacity(rows.len());
        for row in rows {
            let payments = self.payments_for(BillId::from_uuid(row.bill_id)).await?;
            bills.push(bill_from_row(row, payments)?);
        }
        Ok(bills)
    }
}

async fn insert_bill(pool: &PgPool, bill: &Bill, number: &str) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO bills (bill_id, bill_number, booking_id, customer_id, issued_by, \
         subtotal, tax_amount, discount_amount, paid_amount, currency, payment_method, status, \
         issued_date, due_date, paid_date, notes, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)",
    )
    .bind(bill.id.as_uuid())
    .bind(number)
    .bind(bill.booking_id.as_uuid())
    .bind(bill.customer_id.as_uuid())
    .bind(bill.issued_by.as_uuid())
    .bind(bill.subtotal.amount())
    .bind(bill.tax_amount.amount())
    .bind(bill.discount_amount.amount())
    .bind(bill.paid_amount.amount())
    .bind(bill.subtotal.currency().code())
    .bind(bill.payment_method.map(payment_method_to_db))
    .bind(bill_status_to_db(bill.status))
    .bind(bill.issued_date)
    .bind(bill.due_date)
    .bind(bill.paid_date)
    .bind(&bill.notes)
    .bind(bill.created_at)
    .bind(bill.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

async fn insert_payment(
    tx: &mut Transaction<'_, Postgres>,
    bill_id: BillId,
    record: &PaymentRecord,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO bill_payments (bill_payment_id, bill_id, amount, currency, method, \
         paid_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(Uuid::new_v4())
    .bind(bill_id.as_uuid())
    .bind(record.amount.amount())
    .bind(record.amount.currency().code())
    .bind(payment_method_to_db(record.method))
    .bind(record.paid_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
