//! Overwrite an existing activity.

use tracing::{debug, info, warn};

use super::ActivityError;
use crate::domain::{Ack, Activity};
use crate::persistence::DataContext;

#[derive(Debug, Clone)]
pub struct Command {
    /// Full replacement. Its `id` selects the record to overwrite.
    pub activity: Activity,
}

pub async fn handle(command: Command, ctx: &dyn DataContext) -> Result<Ack, ActivityError> {
    let update = command.activity;
    update
        .form()
        .validate()
        .map_err(ActivityError::ValidationError)?;

    let Some(mut existing) = ctx.find(update.id).await? else {
        warn!(id = %update.id, "Not found");
        return Err(ActivityError::NotFound(update.id));
    };
    debug!(id = %update.id, ?existing, "Edit");

    existing.apply(update.form());
    if !ctx.update(&existing).await? {
        // Removed between the lookup and the write.
        warn!(id = %update.id, "Not found");
        return Err(ActivityError::NotFound(update.id));
    }
    info!(id = %existing.id, "Updated");
    Ok(Ack {})
}
