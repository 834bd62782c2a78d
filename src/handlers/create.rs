//! Insert a new activity.

use tracing::{info, warn};

use super::ActivityError;
use crate::domain::{Ack, Activity};
use crate::persistence::DataContext;

#[derive(Debug, Clone)]
pub struct Command {
    pub activity: Activity,
}

/// Validates and inserts the activity. A duplicate id is reported as
/// [`ActivityError::AlreadyExists`] and leaves the stored record untouched.
pub async fn handle(command: Command, ctx: &dyn DataContext) -> Result<Ack, ActivityError> {
    let activity = command.activity;
    activity
        .form()
        .validate()
        .map_err(ActivityError::ValidationError)?;

    if let Err(e) = ctx.insert(&activity).await {
        warn!(id = %activity.id, error = %e, "Create failed");
        return Err(e.into());
    }
    info!(id = %activity.id, "Created");
    Ok(Ack {})
}
