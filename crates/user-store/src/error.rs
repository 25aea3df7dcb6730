use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User already exists: {0}")]
    DuplicateEmail(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
