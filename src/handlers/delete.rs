//! Remove an activity.

use tracing::{info, warn};
use uuid::Uuid;

use super::ActivityError;
use crate::domain::Ack;
use crate::persistence::DataContext;

#[derive(Debug, Clone)]
pub struct Command {
    pub id: Uuid,
}

pub async fn handle(command: Command, ctx: &dyn DataContext) -> Result<Ack, ActivityError> {
    if ctx.remove(command.id).await? {
        info!(id = %command.id, "Deleted");
        Ok(Ack {})
    } else {
        warn!(id = %command.id, "Not found");
        Err(ActivityError::NotFound(command.id))
    }
}
