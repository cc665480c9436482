//! Application error handling
//!
//! One error type for the whole application: validation failures stop records
//! before they reach the store, remote failures surface as failed syncs, and
//! everything is reported to the caller rather than panicking.

use fittrack_shared::ValidationError;
use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("A sync is already in progress")]
    SyncInProgress,

    #[error("Sync is disabled in configuration")]
    SyncDisabled,

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
