//! List every activity.

use tracing::debug;

use super::ActivityError;
use crate::domain::Activity;
use crate::persistence::DataContext;

#[derive(Debug, Clone, Default)]
pub struct Query;

pub async fn handle(_query: Query, ctx: &dyn DataContext) -> Result<Vec<Activity>, ActivityError> {
    let activities = ctx.list().await?;
    debug!(count = activities.len(), "List");
    Ok(activities)
}
