//! Customer repository

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::CustomerId;
use domain_guest::Customer;

use crate::error::DatabaseError;

/// Repository for customer records
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    customer_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address: Option<String>,
    city: Option<String>,
    country: Option<String>,
    postal_code: Option<String>,
    identification_number: String,
    date_of_birth: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: CustomerId::from_uuid(row.customer_id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone_number: row.phone,
            address: row.address,
            city: row.city,
            country: row.country,
            postal_code: row.postal_code,
            identification_number: row.identification_number,
            date_of_birth: row.date_of_birth,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const CUSTOMER_COLUMNS: &str = "customer_id, first_name, last_name, email, phone, address, \
     city, country, postal_code, identification_number, date_of_birth, created_at, updated_at";

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a customer by their identifier
    pub async fn get_by_id(&self, customer_id: CustomerId) -> Result<Customer, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE customer_id = $1"
        ))
        .bind(customer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Customer", customer_id))?;

        Ok(row.into())
    }

    /// Returns true if a customer with this id exists
    pub async fn exists(&self, customer_id: CustomerId) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM customers WHERE customer_id = $1)",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Retrieves a customer by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Searches customers by name fragment, case-insensitively
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Customer>, DatabaseError> {
        let pattern = format!("%{}%", fragment);
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE first_name ILIKE $1 OR last_name ILIKE $1 \
             ORDER BY last_name, first_name"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Retrieves all customers
    pub async fn list(&self) -> Result<Vec<Customer>, DatabaseError> {
        let rows = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY last_name, first_name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Inserts a new customer
    pub async fn create(&self, customer: &Customer) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO customers (customer_id, first_name, last_name, email, phone, \
             address, city, country, postal_code, identification_number, date_of_birth, \
             created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.country)
        .bind(&customer.postal_code)
        .bind(&customer.identification_number)
        .bind(customer.date_of_birth)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a customer's details
    pub async fn update(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE customers SET first_name = $2, last_name = $3, email = $4, phone = $5, \
             address = $6, city = $7, country = $8, postal_code = $9, \
             identification_number = $10, date_of_birth = $11, updated_at = $12 \
             WHERE customer_id = $1",
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.phone_number)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.country)
        .bind(&customer.postal_code)
        .bind(&customer.identification_number)
        .bind(customer.date_of_birth)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", customer.id));
        }
        Ok(())
    }

    /// Deletes a customer, refusing while bookings reference them
    pub async fn delete(&self, customer_id: CustomerId) -> Result<(), DatabaseError> {
        let (in_use,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE customer_id = $1)",
        )
        .bind(customer_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(DatabaseError::BusinessRule(format!(
                "Customer {} has bookings and cannot be deleted",
                customer_id
            )));
        }

        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(customer_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Customer", customer_id));
        }
        Ok(())
    }
}
