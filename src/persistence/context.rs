//! The persistence contract shared by every backing store.

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreError;
use crate::domain::Activity;

/// Access to the durable set of [`Activity`] records.
///
/// # Architecture Note
/// Handlers only ever see `&dyn DataContext`, so the mediator can run against
/// SQLite in production and against [`MemoryContext`](super::MemoryContext) in tests
/// without any handler knowing which.
///
/// Every write method returns only after the store has committed the change.
#[async_trait]
pub trait DataContext: Send + Sync + 'static {
    /// Applies pending schema migrations.
    async fn migrate(&self) -> Result<(), StoreError>;

    /// Returns all records ordered by date, then id.
    async fn list(&self) -> Result<Vec<Activity>, StoreError>;

    /// Looks a record up by identifier.
    async fn find(&self, id: Uuid) -> Result<Option<Activity>, StoreError>;

    /// Inserts a new record. Fails with [`StoreError::Conflict`] on a duplicate id.
    async fn insert(&self, activity: &Activity) -> Result<(), StoreError>;

    /// Inserts every record or none of them. A duplicate id, in the store or
    /// within `activities`, fails the whole batch with [`StoreError::Conflict`].
    async fn insert_all(&self, activities: &[Activity]) -> Result<(), StoreError>;

    /// Overwrites the stored record with the same id. Returns `false` when no such record exists.
    async fn update(&self, activity: &Activity) -> Result<bool, StoreError>;

    /// Removes a record. Returns `false` when no such record exists.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Number of stored records.
    async fn count(&self) -> Result<usize, StoreError>;
}
