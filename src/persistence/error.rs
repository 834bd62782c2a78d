//! Error types for the persistence context.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by a [`DataContext`](super::DataContext).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same primary key already exists.
    #[error("Activity already exists: {0}")]
    Conflict(Uuid),

    /// The underlying database rejected the operation.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying pending schema migrations failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
