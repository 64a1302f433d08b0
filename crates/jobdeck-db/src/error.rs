//! Database error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("query timed out: {0}")]
    Timeout(String),

    #[error("failed to decode row: {0}")]
    Decode(String),
}

pub type DbResult<T> = std::result::Result<T, DbError>;
