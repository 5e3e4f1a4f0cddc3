//! Billing DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_billing::{Bill, PaymentMethod, PaymentRecord};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBillRequest {
    pub booking_id: Uuid,
    /// Tax charged on top of the subtotal
    #[serde(default)]
    pub tax_amount: Decimal,
    /// Discount applied to the whole bill
    #[serde(default)]
    pub discount_amount: Decimal,
    /// Payment deadline; defaults to 14 days after issue
    pub due_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BillListQuery {
    pub customer_id: Option<Uuid>,
    pub booking_id: Option<Uuid>,
    /// Exact bill number lookup
    pub number: Option<String>,
    #[serde(default)]
    pub unpaid: bool,
    #[serde(default)]
    pub overdue: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub method: String,
}

#[derive(Debug, Serialize)]
pub struct BillResponse {
    pub id: Uuid,
    pub bill_number: String,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub issued_by_id: Uuid,
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub remaining_balance: Decimal,
    pub currency: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub is_paid: bool,
    pub issued_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub paid_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub payments: Vec<PaymentResponse>,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub amount: Decimal,
    pub method: String,
    pub paid_at: DateTime<Utc>,
}

pub fn payment_method_name(method: PaymentMethod) -> &'static str {
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

pub fn parse_payment_method(method: &str) -> Option<PaymentMethod> {
    match method {
        "cash" => Some(PaymentMethod::Cash),
        "credit_card" => Some(PaymentMethod::CreditCard),
        "debit_card" => Some(PaymentMethod::DebitCard),
        "bank_transfer" => Some(PaymentMethod::BankTransfer),
        "check" => Some(PaymentMethod::Check),
        "mobile_payment" => Some(PaymentMethod::MobilePayment),
        "online_payment" => Some(PaymentMethod::OnlinePayment),
        _ => None,
    }
}

fn bill_status_name(status: domain_billing::BillStatus) -> &'static str {
    use domain_billing::BillStatus;
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

impl From<PaymentRecord> for PaymentResponse {
    fn from(p: PaymentRecord) -> Self {
        Self {
            amount: p.amount.amount(),
            method: payment_method_name(p.method).to_string(),
            paid_at: p.paid_at,
        }
    }
}

impl From<Bill> for BillResponse {
    fn from(bill: Bill) -> Self {
        let total = bill.total_amount();
        let remaining = bill.remaining_balance();
        let is_paid = bill.is_paid();
        Self {
            id: bill.id.into(),
            bill_number: bill.bill_number,
            booking_id: bill.booking_id.into(),
            customer_id: bill.customer_id.into(),
            issued_by_id: bill.issued_by.into(),
            subtotal: bill.subtotal.amount(),
            tax_amount: bill.tax_amount.amount(),
            discount_amount: bill.discount_amount.amount(),
            total_amount: total.amount(),
            paid_amount: bill.paid_amount.amount(),
            remaining_balance: remaining.amount(),
            currency: bill.subtotal.currency().code().to_string(),
            payment_method: bill.payment_method.map(|m| payment_method_name(m).to_string()),
            status: bill_status_name(bill.status).to_string(),
            is_paid,
            issued_date: bill.issued_date,
            due_date: bill.due_date,
            paid_date: bill.paid_date,
            notes: bill.notes,
            payments: bill.payments.into_iter().map(PaymentResponse::from).collect(),
        }
    }
}
