//! Axum route handlers for registration and login.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::{NewUser, UserProfile};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub account_type: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user: UserProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let email = request.email.trim().to_lowercase();
    if request.username.trim().is_empty()
        || email.is_empty()
        || request.password.is_empty()
        || request.account_type.trim().is_empty()
    {
        return Err(AppError::Validation(
            "username, email, password and accountType are required".to_string(),
        ));
    }

    let conflict = format!("User {email} already exists");
    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(conflict));
    }

    let password_hash = hash_password(request.password, state.config.bcrypt_cost).await?;

    let user = state
        .users
        .create(NewUser {
            username: request.username.trim().to_string(),
            email,
            password_hash,
            account_type: request.account_type.trim().to_string(),
        })
        .await
        .map_err(|e| AppError::conflict_on_unique(e, conflict))?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(RegisterResponse { user })))
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password produce the same response.
pub async fn handle_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(request.password, user.password_hash).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(LoginResponse { token }))
}
