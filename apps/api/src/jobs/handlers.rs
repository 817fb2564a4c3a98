//! Axum route handlers for the Jobs API.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::matching::{match_jobs, MatchOptions};
use crate::models::job::{JobDetail, JobInput, JobSummary, PostingFilter, RankedPosting};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PublishResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SaveToggleResponse {
    pub is_saved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub skills: String,
    pub experience: Option<String>,
    pub work_mode: Option<String>,
    #[serde(default = "default_filter_zero")]
    pub filter_zero: bool,
}

fn default_filter_zero() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub jobs: Vec<RankedPosting>,
}

fn validate_job(input: &JobInput) -> Result<(), AppError> {
    let missing = input.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// An empty filter value means "no filter". Anything else is matched exactly.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_publish(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<JobInput>,
) -> Result<(StatusCode, Json<PublishResponse>), AppError> {
    validate_job(&input)?;
    let id = state.jobs.insert(user.id, &input).await?;
    Ok((StatusCode::CREATED, Json(PublishResponse { id })))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    Ok(Json(state.jobs.list().await?))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<Json<JobDetail>, AppError> {
    let job = state
        .jobs
        .find(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    let is_saved = state.jobs.is_saved(user.id, job_id).await?;
    Ok(Json(JobDetail { job, is_saved }))
}

/// PUT /api/v1/jobs/:id
///
/// Only the publisher may edit a posting; anyone else gets 404.
pub async fn handle_edit_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<JobInput>,
) -> Result<StatusCode, AppError> {
    validate_job(&input)?;
    if !state.jobs.update(user.id, job_id, &input).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("User {} edited job {job_id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.jobs.delete(user.id, job_id).await? {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }
    info!("User {} deleted job {job_id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/jobs/:id/save
///
/// Saves the posting, or un-saves it if it was already saved. A posting that
/// does not exist, or disappears mid-request, is a 404.
pub async fn handle_toggle_save(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(job_id): ApiPath<Uuid>,
) -> Result<Json<SaveToggleResponse>, AppError> {
    let is_saved = state
        .jobs
        .toggle_saved(user.id, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    Ok(Json(SaveToggleResponse { is_saved }))
}

/// GET /api/v1/me/saved-jobs
pub async fn handle_saved_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    Ok(Json(state.jobs.list_saved(user.id).await?))
}

/// GET /api/v1/me/jobs
pub async fn handle_published_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    Ok(Json(state.jobs.list_by_owner(user.id).await?))
}

/// POST /api/v1/jobs/match
///
/// Ranks postings by TF-IDF cosine similarity to the submitted skills.
/// Experience and work-mode filters narrow the corpus before it is weighted.
pub async fn handle_match(
    State(state): State<AppState>,
    _user: AuthUser,
    ApiJson(request): ApiJson<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let options = MatchOptions {
        filter_zero: request.filter_zero,
        filter: PostingFilter {
            experience: non_empty(request.experience),
            work_mode: non_empty(request.work_mode),
        },
    };

    let jobs = match_jobs(&request.skills, state.jobs.as_ref(), &options).await?;
    Ok(Json(MatchResponse { jobs }))
}
