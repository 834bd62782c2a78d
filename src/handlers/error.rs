//! Error types for the activity handlers.

use thiserror::Error;
use uuid::Uuid;

use crate::persistence::StoreError;

/// Errors that can occur while handling an activity message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActivityError {
    /// No activity has the requested identifier.
    #[error("Activity not found: {0}")]
    NotFound(Uuid),

    /// An activity with the same identifier already exists.
    #[error("Activity already exists: {0}")]
    AlreadyExists(Uuid),

    /// The activity data provided is invalid.
    #[error("Activity validation error: {0}")]
    ValidationError(String),

    /// An underlying database error occurred.
    #[error("Activity database error: {0}")]
    DatabaseError(String),
}

impl From<StoreError> for ActivityError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(id) => ActivityError::AlreadyExists(id),
            other => ActivityError::DatabaseError(other.to_string()),
        }
    }
}
