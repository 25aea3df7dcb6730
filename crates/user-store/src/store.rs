use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StoreError;
use crate::models::{KnowledgeLevel, User};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    level TEXT NOT NULL DEFAULT 'BEGINNER',
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
"#;

/// SQLite-backed account store. Opened once at process start and handed to
/// the server as an explicit dependency.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Open (creating the file and schema if missing) a store at the given
    /// `sqlite:` URL.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(sqlx::Error::from)?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Create an account. Fails with [`StoreError::DuplicateEmail`] if the
    /// email is already registered; existing accounts are never overwritten.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password_hash) VALUES (?, ?) RETURNING *",
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => {
                tracing::info!(email, "Registered new user");
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateEmail(email.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Set the knowledge level of the account with the given email. The
    /// only in-scope mutation of an account.
    pub async fn update_level(
        &self,
        email: &str,
        level: KnowledgeLevel,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE users SET level = ? WHERE email = ?")
            .bind(level)
            .bind(email)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(email.to_string()));
        }
        tracing::info!(email, level = %level, "Updated knowledge level");
        Ok(())
    }
}
