//! Service DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_property::{Service, ServiceType};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceTypeRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub service_type_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdateServiceRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct ServiceListQuery {
    #[serde(default)]
    pub only_available: bool,
}

#[derive(Debug, Serialize)]
pub struct ServiceTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub service_type_id: Uuid,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ServiceType> for ServiceTypeResponse {
    fn from(st: ServiceType) -> Self {
        Self {
            id: st.id.into(),
            name: st.name,
            description: st.description,
            created_at: st.created_at,
        }
    }
}

impl From<Service> for ServiceResponse {
    fn from(s: Service) -> Self {
        Self {
            id: s.id.into(),
            name: s.name,
            description: s.description,
            price: s.price.amount(),
            currency: s.price.currency().code().to_string(),
            service_type_id: s.service_type_id.into(),
            is_available: s.is_available,
            created_at: s.created_at,
        }
    }
}
