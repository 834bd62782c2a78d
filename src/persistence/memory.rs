//! In-process [`DataContext`] backed by a `HashMap`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{DataContext, StoreError};
use crate::domain::Activity;

/// A volatile store with the same semantics as the SQLite context.
///
/// Used by tests. The lock is held only for the duration of a single operation.
#[derive(Default)]
pub struct MemoryContext {
    store: RwLock<HashMap<Uuid, Activity>>,
}

impl MemoryContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataContext for MemoryContext {
    async fn migrate(&self) -> Result<(), StoreError> {
        debug!("Nothing to migrate for in-memory store");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Activity>, StoreError> {
        let store = self.store.read().await;
        let mut activities: Vec<Activity> = store.values().cloned().collect();
        activities.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(activities)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Activity>, StoreError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, activity: &Activity) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        if store.contains_key(&activity.id) {
            return Err(StoreError::Conflict(activity.id));
        }
        store.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn insert_all(&self, activities: &[Activity]) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        let mut staged = HashMap::with_capacity(activities.len());
        for activity in activities {
            if store.contains_key(&activity.id) || staged.contains_key(&activity.id) {
                return Err(StoreError::Conflict(activity.id));
            }
            staged.insert(activity.id, activity.clone());
        }
        store.extend(staged);
        Ok(())
    }

    async fn update(&self, activity: &Activity) -> Result<bool, StoreError> {
        let mut store = self.store.write().await;
        match store.get_mut(&activity.id) {
            Some(existing) => {
                *existing = activity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.store.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.store.read().await.len())
    }
}
