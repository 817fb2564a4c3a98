use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::password::hash_password;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::user::{UserProfile, UserUpdate};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    /// Left unchanged when absent or empty.
    pub password: Option<String>,
}

/// GET /api/v1/me
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state
        .users
        .find_profile(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;
    Ok(Json(ProfileResponse { user: profile }))
}

/// PATCH /api/v1/me
pub async fn handle_update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let email = request.email.trim().to_lowercase();
    if request.username.trim().is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "username and email are required".to_string(),
        ));
    }

    let conflict = format!("Email {email} is already in use");
    if state.users.email_taken_by_other(&email, user.id).await? {
        return Err(AppError::Conflict(conflict));
    }

    let password_hash = match request.password.filter(|p| !p.is_empty()) {
        Some(password) => Some(hash_password(password, state.config.bcrypt_cost).await?),
        None => None,
    };

    let profile = state
        .users
        .update(
            user.id,
            UserUpdate {
                username: request.username.trim().to_string(),
                email,
                password_hash,
            },
        )
        .await
        .map_err(|e| AppError::conflict_on_unique(e, conflict))?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))?;

    info!("Updated profile for user {}", user.id);
    Ok(Json(ProfileResponse { user: profile }))
}

/// DELETE /api/v1/me
///
/// The user's postings and saved jobs are removed with the account.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    if !state.users.delete(user.id).await? {
        return Err(AppError::NotFound(format!("User {} not found", user.id)));
    }
    info!("Deleted user {}", user.id);
    Ok(StatusCode::NO_CONTENT)
}
