//! Customer handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::CustomerId;
use domain_guest::Customer;
use domain_staff::Capability;
use infra_db::CustomerRepository;

use crate::auth::Claims;
use crate::dto::customers::*;
use crate::error::ApiError;
use crate::handlers::require;
use crate::AppState;

/// Registers a new customer
pub async fn create_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>), ApiError> {
    require(&claims, Capability::ManageCustomers)?;
    request.validate()?;

    let repo = CustomerRepository::new(state.pool.clone());
    if repo.find_by_email(&request.email).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "A customer with email {} already exists",
            request.email
        )));
    }

    let mut customer = Customer::new(
        request.first_name,
        request.last_name,
        request.email,
        request.phone_number,
        request.identification_number,
        request.date_of_birth,
    )?;
    customer.address = request.address;
    customer.city = request.city;
    customer.country = request.country;
    customer.postal_code = request.postal_code;

    repo.create(&customer).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Lists or searches customers
///
/// A `name` fragment matches first or last names case-insensitively; an
/// `email` must match exactly.
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerSearchQuery>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let repo = CustomerRepository::new(state.pool.clone());

    let customers = if let Some(email) = query.email.as_deref() {
        repo.find_by_email(email).await?.into_iter().collect()
    } else if let Some(name) = query.name.as_deref() {
        repo.search_by_name(name).await?
    } else {
        repo.list().await?
    };

    Ok(Json(
        customers.into_iter().map(CustomerResponse::from).collect(),
    ))
}

/// Gets a customer by id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let repo = CustomerRepository::new(state.pool.clone());
    let customer = repo.get_by_id(CustomerId::from_uuid(id)).await?;
    Ok(Json(customer.into()))
}

/// Updates a customer's contact details
pub async fn update_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    require(&claims, Capability::ManageCustomers)?;
    request.validate()?;

    let repo = CustomerRepository::new(state.pool.clone());
    let mut customer = repo.get_by_id(CustomerId::from_uuid(id)).await?;

    if request.email != customer.email {
        if let Some(other) = repo.find_by_email(&request.email).await? {
            if other.id != customer.id {
                return Err(ApiError::Conflict(format!(
                    "A customer with email {} already exists",
                    request.email
                )));
            }
        }
    }

    customer.first_name = request.first_name;
    customer.last_name = request.last_name;
    customer.email = request.email;
    customer.phone_number = request.phone_number;
    customer.address = request.address;
    customer.city = request.city;
    customer.country = request.country;
    customer.postal_code = request.postal_code;
    customer.updated_at = chrono::Utc::now();

    repo.update(&customer).await?;
    Ok(Json(customer.into()))
}

/// Deletes a customer with no booking history
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageCustomers)?;

    let repo = CustomerRepository::new(state.pool.clone());
    repo.delete(CustomerId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
