//! Staff user handlers
//!
//! Every route here requires the user management capability, which only
//! administrators hold.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::UserId;
use domain_staff::{Capability, StaffError, User};
use infra_db::UserRepository;

use crate::auth::{parse_role, Claims};
use crate::dto::users::*;
use crate::error::ApiError;
use crate::handlers::require;
use crate::AppState;

/// Creates a staff account
pub async fn create_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    require(&claims, Capability::ManageUsers)?;
    request.validate()?;

    let role = parse_role(&request.role)
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown role: {}", request.role)))?;

    let repo = UserRepository::new(state.pool.clone());
    if repo.username_exists(&request.username).await? {
        return Err(StaffError::DuplicateUsername(request.username).into());
    }
    if repo.email_exists(&request.email).await? {
        return Err(StaffError::DuplicateEmail(request.email).into());
    }

    let user = User::new(
        request.username,
        request.email,
        &request.password,
        request.full_name,
        role,
    )?;

    repo.create(&user).await?;
    tracing::info!(username = %user.username, "Staff account created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Lists staff accounts
pub async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require(&claims, Capability::ManageUsers)?;

    let repo = UserRepository::new(state.pool.clone());
    let users = repo.list().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Gets a staff account by id
pub async fn get_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&claims, Capability::ManageUsers)?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo.get_by_id(UserId::from_uuid(id)).await?;
    Ok(Json(user.into()))
}

/// Resets a staff account's password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    require(&claims, Capability::ManageUsers)?;
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let mut user = repo.get_by_id(UserId::from_uuid(id)).await?;

    user.change_password(&request.new_password)?;
    repo.update(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deactivates a staff account
pub async fn deactivate_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&claims, Capability::ManageUsers)?;

    let repo = UserRepository::new(state.pool.clone());
    let mut user = repo.get_by_id(UserId::from_uuid(id)).await?;

    user.deactivate();
    repo.update(&user).await?;
    Ok(Json(user.into()))
}

/// Reactivates a staff account
pub async fn activate_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    require(&claims, Capability::ManageUsers)?;

    let repo = UserRepository::new(state.pool.clone());
    let mut user = repo.get_by_id(UserId::from_uuid(id)).await?;

    user.activate();
    repo.update(&user).await?;
    Ok(Json(user.into()))
}
