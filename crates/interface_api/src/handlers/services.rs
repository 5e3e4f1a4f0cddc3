//! Service catalogue handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use core_kernel::{Currency, Money, ServiceId, ServiceTypeId};
use domain_property::{Service, ServiceType};
use domain_staff::Capability;
use infra_db::ServiceRepository;

use crate::auth::Claims;
use crate::dto::services::*;
use crate::error::ApiError;
use crate::handlers::require;
use crate::AppState;

/// Creates a service type
pub async fn create_service_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateServiceTypeRequest>,
) -> Result<(StatusCode, Json<ServiceTypeResponse>), ApiError> {
    require(&claims, Capability::ManageInventory)?;
    request.validate()?;

    let mut service_type = ServiceType::new(request.name)?;
    if let Some(description) = request.description {
        service_type = service_type.with_description(description);
    }

    let repo = ServiceRepository::new(state.pool.clone());
    repo.create_service_type(&service_type).await?;
    Ok((StatusCode::CREATED, Json(service_type.into())))
}

/// Lists service types
pub async fn list_service_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceTypeResponse>>, ApiError> {
    let repo = ServiceRepository::new(state.pool.clone());
    let service_types = repo.list_service_types().await?;
    Ok(Json(
        service_types
            .into_iter()
            .map(ServiceTypeResponse::from)
            .collect(),
    ))
}

/// Deletes a service type that no service references
pub async fn delete_service_type(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageInventory)?;

    let repo = ServiceRepository::new(state.pool.clone());
    repo.delete_service_type(ServiceTypeId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Adds a service to the catalogue
pub async fn create_service(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateServiceRequest>,
) -> Result<(StatusCode, Json<ServiceResponse>), ApiError> {
    require(&claims, Capability::ManageInventory)?;
    request.validate()?;

    let currency: Currency = request
        .currency
        .parse()
        .map_err(|e: core_kernel::MoneyError| ApiError::BadRequest(e.to_string()))?;

    let repo = ServiceRepository::new(state.pool.clone());
    repo.get_service_type(ServiceTypeId::from_uuid(request.service_type_id))
        .await?;

    let mut service = Service::new(
        request.name,
        Money::new(request.price, currency),
        ServiceTypeId::from_uuid(request.service_type_id),
    )?;
    if let Some(description) = request.description {
        service = service.with_description(description);
    }

    repo.create_service(&service).await?;
    Ok((StatusCode::CREATED, Json(service.into())))
}

/// Lists services
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServiceListQuery>,
) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
    let repo = ServiceRepository::new(state.pool.clone());
    let services = repo.list_services(query.only_available).await?;
    Ok(Json(
        services.into_iter().map(ServiceResponse::from).collect(),
    ))
}

/// Gets a service by id
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ServiceResponse>, ApiError> {
    let repo = ServiceRepository::new(state.pool.clone());
    let service = repo.get_service(ServiceId::from_uuid(id)).await?;
    Ok(Json(service.into()))
}

/// Updates a service's details and availability
pub async fn update_service(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateServiceRequest>,
) -> Result<Json<ServiceResponse>, ApiError> {
    require(&claims, Capability::ManageInventory)?;

    let repo = ServiceRepository::new(state.pool.clone());
    let mut service = repo.get_service(ServiceId::from_uuid(id)).await?;

    if request.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Service name must not be empty".to_string(),
        ));
    }
    if request.price.is_sign_negative() {
        return Err(ApiError::BadRequest(
            "Service price must not be negative".to_string(),
        ));
    }

    service.name = request.name;
    service.description = request.description;
    service.price = Money::new(request.price, service.price.currency());
    service.is_available = request.is_available;
    service.updated_at = Utc::now();

    repo.update_service(&service).await?;
    Ok(Json(service.into()))
}

/// Deletes a service that no booking line references
pub async fn delete_service(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageInventory)?;

    let repo = ServiceRepository::new(state.pool.clone());
    repo.delete_service(ServiceId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
