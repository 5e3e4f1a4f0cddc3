//! Login handler

use axum::{extract::State, Json};
use chrono::Utc;

use infra_db::UserRepository;

use crate::auth::create_token;
use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::AppState;

/// Exchanges credentials for a JWT
///
/// A missing user and a wrong password produce the same response so the
/// endpoint does not leak which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());

    let mut user = repo
        .find_by_username(&request.username)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    user.authenticate(&request.password, Utc::now())?;
    repo.update(&user).await?;

    let token = create_token(
        &user.id.as_uuid().to_string(),
        user.role,
        &state.config.jwt_secret,
        state.config.jwt_expiration_secs,
    )
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.into(),
    }))
}
