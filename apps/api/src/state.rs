use std::sync::Arc;

use crate::auth::jwt::TokenKeys;
use crate::config::Config;
use crate::jobs::repository::JobRepository;
use crate::users::repository::UserRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Job storage. Also the posting source for the matcher.
    pub jobs: Arc<dyn JobRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: TokenKeys,
    pub config: Config,
}
