//! Service repository
//!
//! Covers service types, services, and the per-booking service lines that
//! snapshot prices at consumption time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{BookingId, BookingServiceId, Money, ServiceId, ServiceTypeId};
use domain_booking::BookingServiceLine;
use domain_property::{Service, ServiceType};

use crate::error::DatabaseError;
use crate::repositories::rooms::currency_from_db;

/// Repository for services and booking service lines
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceTypeRow {
    service_type_id: Uuid,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    service_id: Uuid,
    service_type_id: Uuid,
    name: String,
    description: Option<String>,
    price: Decimal,
    currency: String,
    is_available: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct BookingServiceRow {
    booking_service_id: Uuid,
    booking_id: Uuid,
    service_id: Uuid,
    quantity: i32,
    service_price: Decimal,
    currency: String,
    service_date: DateTime<Utc>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ServiceTypeRow> for ServiceType {
    fn from(row: ServiceTypeRow) -> Self {
        ServiceType {
            id: ServiceTypeId::from_uuid(row.service_type_id),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<ServiceRow> for Service {
    type Error = DatabaseError;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        Ok(Service {
            id: ServiceId::from_uuid(row.service_id),
            name: row.name,
            description: row.description,
            price: Money::new(row.price, currency_from_db(&row.currency)?),
            service_type_id: ServiceTypeId::from_uuid(row.service_type_id),
            is_available: row.is_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<BookingServiceRow> for BookingServiceLine {
    type Error = DatabaseError;

    fn try_from(row: BookingServiceRow) -> Result<Self, Self::Error> {
        Ok(BookingServiceLine {
            id: BookingServiceId::from_uuid(row.booking_service_id),
            booking_id: BookingId::from_uuid(row.booking_id),
            service_id: ServiceId::from_uuid(row.service_id),
            quantity: row.quantity as u32,
            service_price: Money::new(row.service_price, currency_from_db(&row.currency)?),
            service_date: row.service_date,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

const SERVICE_COLUMNS: &str = "service_id, service_type_id, name, description, price, \
     currency, is_available, created_at, updated_at";

const LINE_COLUMNS: &str = "booking_service_id, booking_id, service_id, quantity, \
     service_price, currency, service_date, notes, created_at";

impl ServiceRepository {
    /// Creates a new ServiceRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a service type by its identifier
    pub async fn get_service_type(
        &self,
        service_type_id: ServiceTypeId,
    ) -> Result<ServiceType, DatabaseError> {
        let row = sqlx::query_as::<_, ServiceTypeRow>(
            "SELECT service_type_id, name, description, created_at, updated_at \
             FROM service_types WHERE service_type_id = $1",
        )
        .bind(service_type_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("ServiceType", service_type_id))?;

        Ok(row.into())
    }

    /// Retrieves all service types
    pub async fn list_service_types(&self) -> Result<Vec<ServiceType>, DatabaseError> {
        let rows = sqlx::query_as::<_, ServiceTypeRow>(
            "SELECT service_type_id, name, description, created_at, updated_at \
             FROM service_types ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ServiceType::from).collect())
    }

    /// Inserts a new service type
    pub async fn create_service_type(
        &self,
        service_type: &ServiceType,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO service_types (service_type_id, name, description, created_at, \
             updated_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(service_type.id.as_uuid())
        .bind(&service_type.name)
        .bind(&service_type.description)
        .bind(service_type.created_at)
        .bind(service_type.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a service type, refusing while services reference it
    pub async fn delete_service_type(
        &self,
        service_type_id: ServiceTypeId,
    ) -> Result<(), DatabaseError> {
        let (in_use,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM services WHERE service_type_id = $1)",
        )
        .bind(service_type_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(DatabaseError::BusinessRule(format!(
                "ServiceType {} still has services and cannot be deleted",
                service_type_id
            )));
        }

        let result = sqlx::query("DELETE FROM service_types WHERE service_type_id = $1")
            .bind(service_type_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("ServiceType", service_type_id));
        }
        Ok(())
    }

    /// Retrieves a service by its identifier
    pub async fn get_service(&self, service_id: ServiceId) -> Result<Service, DatabaseError> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM services WHERE service_id = $1"
        ))
        .bind(service_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Service", service_id))?;

        row.try_into()
    }

    /// Retrieves all services, optionally only the bookable ones
    pub async fn list_services(&self, only_available: bool) -> Result<Vec<Service>, DatabaseError> {
        let sql = if only_available {
            format!("SELECT {SERVICE_COLUMNS} FROM services WHERE is_available ORDER BY name")
        } else {
            format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY name")
        };
        let rows = sqlx::query_as::<_, ServiceRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Service::try_from).collect()
    }

    /// Inserts a new service
    pub async fn create_service(&self, service: &Service) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO services (service_id, service_type_id, name, description, price, \
             currency, is_available, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(service.id.as_uuid())
        .bind(service.service_type_id.as_uuid())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price.amount())
        .bind(service.price.currency().code())
        .bind(service.is_available)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a service
    pub async fn update_service(&self, service: &Service) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE services SET name = $2, description = $3, price = $4, currency = $5, \
             is_available = $6, updated_at = $7 WHERE service_id = $1",
        )
        .bind(service.id.as_uuid())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price.amount())
        .bind(service.price.currency().code())
        .bind(service.is_available)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Service", service.id));
        }
        Ok(())
    }

    /// Deletes a service, refusing while booking lines reference it
    ///
    /// Recorded lines carry a price snapshot; the row they point at must
    /// survive for the history to resolve.
    pub async fn delete_service(&self, service_id: ServiceId) -> Result<(), DatabaseError> {
        let (in_use,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM booking_services WHERE service_id = $1)",
        )
        .bind(service_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        if in_use {
            return Err(DatabaseError::BusinessRule(format!(
                "Service {} has booking lines and cannot be deleted",
                service_id
            )));
        }

        let result = sqlx::query("DELETE FROM services WHERE service_id = $1")
            .bind(service_id.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Service", service_id));
        }
        Ok(())
    }

    /// Adds a service line to a booking
    pub async fn add_booking_service(
        &self,
        line: &BookingServiceLine,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO booking_services (booking_service_id, booking_id, service_id, \
             quantity, service_price, currency, service_date, notes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(line.id.as_uuid())
        .bind(line.booking_id.as_uuid())
        .bind(line.service_id.as_uuid())
        .bind(line.quantity as i32)
        .bind(line.service_price.amount())
        .bind(line.service_price.currency().code())
        .bind(line.service_date)
        .bind(&line.notes)
        .bind(line.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Retrieves the service lines consumed by a booking
    pub async fn find_booking_services(
        &self,
        booking_id: BookingId,
    ) -> Result<Vec<BookingServiceLine>, DatabaseError> {
        let rows = sqlx::query_as::<_, BookingServiceRow>(&format!(
            "SELECT {LINE_COLUMNS} FROM booking_services WHERE booking_id = $1 \
             ORDER BY service_date"
        ))
        .bind(booking_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingServiceLine::try_from).collect()
    }

    /// Removes a service line from a booking
    pub async fn remove_booking_service(
        &self,
        booking_service_id: BookingServiceId,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM booking_services WHERE booking_service_id = $1",
        )
        .bind(booking_service_id.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("BookingService", booking_service_id));
        }
        Ok(())
    }
}
