//! Database module for Bugtrack Server
//!
//! Contains entities, repositories, and connection utilities for the SQLite store.

pub mod bug;
pub mod user;

pub use bug::{
    Bug, BugFilter, BugRepository, CreateBug, UpdateBug, DEFAULT_PRIORITY, DEFAULT_STATUS,
};
pub use user::{User, UserRepository};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;

const CREATE_BUGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS bugs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    status TEXT NOT NULL,
    priority TEXT NOT NULL
)
"#;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
)
"#;

/// Open the SQLite database and ensure the schema exists.
///
/// An in-memory database lives inside a single connection, so the pool is
/// capped at one connection for `:memory:` URLs; a larger pool would hand out
/// blank databases.
pub async fn connect(
    url: &str,
    max_connections: u32,
    min_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let in_memory = url.contains(":memory:");
    let (max_connections, min_connections) = if in_memory {
        (1, 1)
    } else {
        (max_connections, min_connections)
    };

    let mut options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        // In-memory databases only support the memory journal
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(min_connections)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the tables used by the API when they do not exist yet
async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_BUGS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_USERS_TABLE).execute(pool).await?;
    Ok(())
}
