//! Error types for the parcel tracker.

use crate::parcel::ParcelStatus;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// Storage or connectivity failure reported by SQLite
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("parcel {0} not found")]
    NotFound(i64),

    #[error("invalid parcel status: {0:?}")]
    InvalidStatus(String),

    /// The operation is only allowed while the parcel is still registered
    #[error("parcel {number} is {status}, operation requires registered")]
    StatusLocked { number: i64, status: ParcelStatus },
}

impl TrackerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::NotFound(_))
    }
}
