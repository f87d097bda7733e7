// Error types for the reporting layer
//
// Write paths return StoreError as-is. Read paths never surface it: the
// repositories log and fall back to zero / empty results instead.

use thiserror::Error;

/// Persistence failure raised by a store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Store cannot be reached (poisoned lock, simulated outage)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by the service API
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("user {user_id} not found")]
    NotFound { user_id: i64 },
}

impl FinanceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FinanceError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;
