//! Bugtrack Server Library - REST API components for bug tracking
//!
//! This library exposes the server components for use in integration tests.
//! The main binary uses these same components.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod validation;

pub use auth::{Claims, OptionalAuth, TokenIssuer};
pub use config::Config;
pub use db::{Bug, BugFilter, BugRepository, CreateBug, UpdateBug, User, UserRepository};
pub use error::ApiError;
pub use openapi::ApiDoc;
pub use routes::{create_router, create_router_with_config};
pub use state::AppState;
