//! Fetch one activity by identifier.

use tracing::{debug, warn};
use uuid::Uuid;

use super::ActivityError;
use crate::domain::Activity;
use crate::persistence::DataContext;

#[derive(Debug, Clone)]
pub struct Query {
    pub id: Uuid,
}

pub async fn handle(query: Query, ctx: &dyn DataContext) -> Result<Activity, ActivityError> {
    match ctx.find(query.id).await? {
        Some(activity) => {
            debug!(id = %query.id, "Details");
            Ok(activity)
        }
        None => {
            warn!(id = %query.id, "Not found");
            Err(ActivityError::NotFound(query.id))
        }
    }
}
