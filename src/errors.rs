//! Repository-level error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode stored record: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
