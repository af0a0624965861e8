//! Account handlers
//!
//! Registration and login for locally stored credentials. Both routes stay
//! open even when the bug routes require a token.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::password;
use crate::db::user::is_unique_violation;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;

/// Request body shared by registration and login
#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    /// Account name (unique)
    #[schema(example = "alice")]
    pub username: Option<String>,
    /// Plain-text password, hashed before storage
    #[schema(example = "hunter2")]
    pub password: Option<String>,
}

/// Response body for successful registration
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Confirmation message
    #[schema(example = "User created")]
    pub msg: &'static str,
}

/// Response body for successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token for the Authorization header
    pub access_token: String,
}

/// Register a new account
///
/// Stores a salted hash of the password; the plain text is never persisted.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Missing fields or username already taken")
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (username, password) =
        validation::require_credentials(request.username.as_deref(), request.password.as_deref())?;

    let password_hash = password::hash(password)?;

    match state.user_repo.create(username, &password_hash).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, username, "Registered account");
            Ok((
                StatusCode::CREATED,
                Json(RegisterResponse {
                    msg: "User created",
                }),
            ))
        }
        Err(e) if is_unique_violation(&e) => Err(ApiError::conflict("User already exists")),
        Err(e) => Err(e.into()),
    }
}

/// Log in and obtain a bearer token
///
/// Missing fields, unknown usernames, and wrong passwords all yield the same
/// 401 body.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Bad credentials")
    )
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (username, password) = match (request.username.as_deref(), request.password.as_deref()) {
        (Some(username), Some(password)) => (username, password),
        _ => return Err(ApiError::unauthorized("Bad username or password")),
    };

    let user = state.user_repo.find_by_username(username).await?;

    let verified = user
        .map(|u| password::verify(&u.password_hash, password))
        .unwrap_or(false);
    if !verified {
        return Err(ApiError::unauthorized("Bad username or password"));
    }

    let token = state.token_issuer.issue(username)?;

    tracing::info!(username, "Issued token");

    Ok(Json(LoginResponse {
        access_token: token,
    }))
}
