//! Bug handlers
//!
//! CRUD operations on bug records. Every route here passes through the
//! `OptionalAuth` gate: a bearer token is demanded only when the deployment
//! requires auth.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::auth::OptionalAuth;
use crate::db::{Bug, BugFilter, CreateBug, UpdateBug};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;

/// Query parameters for listing bugs
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListBugsQuery {
    /// Keep only bugs whose status equals this value
    pub status: Option<String>,

    /// Keep only bugs whose priority equals this value
    pub priority: Option<String>,
}

impl From<ListBugsQuery> for BugFilter {
    fn from(query: ListBugsQuery) -> Self {
        Self {
            status: query.status,
            priority: query.priority,
        }
    }
}

/// Request body for creating a bug
///
/// `title` stays optional at the serde level so that an absent field reaches
/// the handler and maps to the API's 400 instead of a deserialization
/// rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBugRequest {
    /// Short description of the problem (required, non-empty)
    #[schema(example = "Login button unresponsive")]
    pub title: Option<String>,
    /// Workflow state label (defaults to "open")
    #[schema(example = "open")]
    pub status: Option<String>,
    /// Urgency label (defaults to "medium")
    #[schema(example = "high")]
    pub priority: Option<String>,
}

/// Request body for updating a bug; omitted fields keep their stored values
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBugRequest {
    /// New title
    pub title: Option<String>,
    /// New status label
    pub status: Option<String>,
    /// New priority label
    pub priority: Option<String>,
}

/// List bugs
///
/// Returns every bug matching the supplied equality filters, oldest first.
#[utoipa::path(
    get,
    path = "/bugs",
    tag = "Bugs",
    params(ListBugsQuery),
    responses(
        (status = 200, description = "Matching bugs", body = [Bug]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn list_bugs_handler(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Query(query): Query<ListBugsQuery>,
) -> Result<Json<Vec<Bug>>, ApiError> {
    let filter = BugFilter::from(query);
    let bugs = state.bug_repo.list(&filter).await?;

    tracing::debug!(actor = auth.actor(), count = bugs.len(), "Listed bugs");

    Ok(Json(bugs))
}

/// Create a bug
///
/// `title` is required; `status` and `priority` fall back to their defaults.
#[utoipa::path(
    post,
    path = "/bugs",
    tag = "Bugs",
    request_body = CreateBugRequest,
    responses(
        (status = 201, description = "Created bug", body = Bug),
        (status = 400, description = "Title missing or empty"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn create_bug_handler(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Json(request): Json<CreateBugRequest>,
) -> Result<(StatusCode, Json<Bug>), ApiError> {
    let title = validation::require_title(request.title.as_deref())?.to_string();

    let bug = state
        .bug_repo
        .create(CreateBug {
            title,
            status: request.status,
            priority: request.priority,
        })
        .await?;

    tracing::info!(bug_id = bug.id, actor = auth.actor(), "Created bug");

    Ok((StatusCode::CREATED, Json(bug)))
}

/// Update a bug
///
/// Overwrites only the supplied fields and returns the resulting record.
#[utoipa::path(
    put,
    path = "/bugs/{id}",
    tag = "Bugs",
    params(
        ("id" = i64, Path, description = "Bug ID")
    ),
    request_body = UpdateBugRequest,
    responses(
        (status = 200, description = "Updated bug", body = Bug),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No bug with this ID")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn update_bug_handler(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBugRequest>,
) -> Result<Json<Bug>, ApiError> {
    let bug = state
        .bug_repo
        .update(
            id,
            UpdateBug {
                title: request.title,
                status: request.status,
                priority: request.priority,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Bug not found"))?;

    tracing::info!(bug_id = bug.id, actor = auth.actor(), "Updated bug");

    Ok(Json(bug))
}

/// Delete a bug
///
/// Always answers 204; deleting an ID that never existed is not an error.
#[utoipa::path(
    delete,
    path = "/bugs/{id}",
    tag = "Bugs",
    params(
        ("id" = i64, Path, description = "Bug ID")
    ),
    responses(
        (status = 204, description = "Bug deleted, or was already absent"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_token" = [])
    )
)]
pub async fn delete_bug_handler(
    State(state): State<AppState>,
    auth: OptionalAuth,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let removed = state.bug_repo.delete(id).await?;

    tracing::info!(bug_id = id, removed, actor = auth.actor(), "Deleted bug");

    Ok(StatusCode::NO_CONTENT)
}
