pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::jobs::handlers as jobs;
use crate::state::AppState;
use crate::users::handlers as users;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Profile
        .route(
            "/api/v1/me",
            get(users::handle_get_profile)
                .patch(users::handle_update_profile)
                .delete(users::handle_delete_account),
        )
        .route("/api/v1/me/jobs", get(jobs::handle_published_jobs))
        .route("/api/v1/me/saved-jobs", get(jobs::handle_saved_jobs))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_publish),
        )
        .route("/api/v1/jobs/match", post(jobs::handle_match))
        .route(
            "/api/v1/jobs/:id",
            get(jobs::handle_get_job)
                .put(jobs::handle_edit_job)
                .delete(jobs::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/save", post(jobs::handle_toggle_save))
        .with_state(state)
}
