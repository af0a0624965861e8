//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod auth;
pub mod bugs;
pub mod health;

pub use crate::state::AppState;
pub use auth::{
    login_handler, register_handler, CredentialsRequest, LoginResponse, RegisterResponse,
};
pub use bugs::{
    create_bug_handler, delete_bug_handler, list_bugs_handler, update_bug_handler,
    CreateBugRequest, ListBugsQuery, UpdateBugRequest,
};
pub use health::{health, ready, HealthResponse, ReadyResponse};
