//! Bug entity and repository
//!
//! Bugs are the unit of work tracked by the API: a title plus free-form
//! status and priority labels.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use utoipa::ToSchema;

/// Status assigned to bugs created without one
pub const DEFAULT_STATUS: &str = "open";
/// Priority assigned to bugs created without one
pub const DEFAULT_PRIORITY: &str = "medium";

/// Bug entity from database; doubles as the wire representation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Bug {
    /// Bug unique identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Short description of the problem
    #[schema(example = "Login button unresponsive")]
    pub title: String,
    /// Workflow state label
    #[schema(example = "open")]
    pub status: String,
    /// Urgency label
    #[schema(example = "medium")]
    pub priority: String,
}

/// DTO for creating a new bug
#[derive(Debug, Clone)]
pub struct CreateBug {
    pub title: String,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// DTO for partially updating a bug
#[derive(Debug, Clone, Default)]
pub struct UpdateBug {
    pub title: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Equality filters for listing bugs
#[derive(Debug, Clone, Default)]
pub struct BugFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
}

/// Repository for bug database operations
#[derive(Clone)]
pub struct BugRepository {
    pool: SqlitePool,
}

impl BugRepository {
    /// Create a new bug repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List bugs matching the filter, oldest first
    ///
    /// Empty filter values are treated as absent. The columns are NOT NULL,
    /// so `col = COALESCE(NULL, col)` reduces to an always-true comparison
    /// for omitted filters.
    pub async fn list(&self, filter: &BugFilter) -> Result<Vec<Bug>, sqlx::Error> {
        let status = filter.status.as_deref().filter(|s| !s.is_empty());
        let priority = filter.priority.as_deref().filter(|p| !p.is_empty());

        sqlx::query_as::<_, Bug>(
            r#"
            SELECT id, title, status, priority
            FROM bugs
            WHERE status = COALESCE(?1, status)
              AND priority = COALESCE(?2, priority)
            ORDER BY id
            "#,
        )
        .bind(status)
        .bind(priority)
        .fetch_all(&self.pool)
        .await
    }

    /// Fetch a single bug by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Bug>, sqlx::Error> {
        sqlx::query_as::<_, Bug>(
            r#"
            SELECT id, title, status, priority
            FROM bugs
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new bug, applying default labels when omitted
    pub async fn create(&self, input: CreateBug) -> Result<Bug, sqlx::Error> {
        sqlx::query_as::<_, Bug>(
            r#"
            INSERT INTO bugs (title, status, priority)
            VALUES (?1, ?2, ?3)
            RETURNING id, title, status, priority
            "#,
        )
        .bind(&input.title)
        .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
        .bind(input.priority.as_deref().unwrap_or(DEFAULT_PRIORITY))
        .fetch_one(&self.pool)
        .await
    }

    /// Apply the provided fields to a bug, returning the updated row
    ///
    /// Returns `None` when no bug has this ID. Omitted fields keep their
    /// stored values.
    pub async fn update(&self, id: i64, input: UpdateBug) -> Result<Option<Bug>, sqlx::Error> {
        sqlx::query_as::<_, Bug>(
            r#"
            UPDATE bugs
            SET
                title = COALESCE(?2, title),
                status = COALESCE(?3, status),
                priority = COALESCE(?4, priority)
            WHERE id = ?1
            RETURNING id, title, status, priority
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.status)
        .bind(&input.priority)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a bug
    ///
    /// Deleting an unknown ID is not an error; the result reports whether a
    /// row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bugs WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
