//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::TokenIssuer;
use crate::db::{BugRepository, UserRepository};

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Database pool, probed directly by the health endpoint
    pub pool: SqlitePool,
    /// Bug repository for bug records
    pub bug_repo: Arc<BugRepository>,
    /// User repository for registered credentials
    pub user_repo: Arc<UserRepository>,
    /// Issuer for signing and validating bearer tokens
    pub token_issuer: Arc<TokenIssuer>,
    /// Whether /bugs routes demand a valid bearer token
    pub require_auth: bool,
}

impl AppState {
    /// Build the state shared by all handlers
    pub fn new(pool: SqlitePool, jwt_secret: &[u8], require_auth: bool) -> Self {
        Self {
            bug_repo: Arc::new(BugRepository::new(pool.clone())),
            user_repo: Arc::new(UserRepository::new(pool.clone())),
            token_issuer: Arc::new(TokenIssuer::new(jwt_secret)),
            pool,
            require_auth,
        }
    }
}
