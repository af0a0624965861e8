//! User entity and repository
//!
//! Handles credentials for locally registered accounts. Passwords are stored
//! as Argon2 hashes in PHC string format, never in clear text.

use sqlx::{FromRow, SqlitePool};

/// User entity from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

/// True when the error is SQLite rejecting a duplicate username
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new user
    ///
    /// The username column is UNIQUE; duplicates surface as a database error
    /// that callers can detect with [`is_unique_violation`].
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?1, ?2)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn repo() -> UserRepository {
        let pool = db::connect("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory database");
        UserRepository::new(pool)
    }

    #[tokio::test]
    async fn test_create_and_find_by_username() {
        let repo = repo().await;

        let created = repo.create("alice", "$argon2id$stub").await.unwrap();
        assert_eq!(created.username, "alice");

        let found = repo
            .find_by_username("alice")
            .await
            .unwrap()
            .expect("user exists");
        assert_eq!(found.id, created.id);
        assert_eq!(found.password_hash, "$argon2id$stub");

        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let repo = repo().await;
        repo.create("alice", "hash-one").await.unwrap();

        let err = repo.create("alice", "hash-two").await.unwrap_err();
        assert!(is_unique_violation(&err));
    }
}
