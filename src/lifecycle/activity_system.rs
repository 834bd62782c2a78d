use std::sync::Arc;

use axum::Router;
use tracing::{error, info};

use crate::api::{self, AppState};
use crate::framework::{Mediator, MediatorClient};
use crate::lifecycle::Settings;
use crate::persistence::{seed_data, DataContext};

/// Startup phase. There is no transition back to `Initializing`; a restart is
/// the only recovery from a failed bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Serving,
}

/// Outcome of [`ActivitySystem::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootReport {
    /// Whether pending migrations were applied. `false` means the store keeps its old schema.
    pub migrated: bool,
    /// Records inserted by seeding, or `None` if seeding failed or was skipped.
    pub seeded: Option<usize>,
}

/// The application context: mediator, persistence and their wiring.
///
/// `ActivitySystem` is responsible for:
/// - **Registration**: Spawning the [`Mediator`] with the persistence context injected
/// - **Bootstrap**: Applying migrations and seed data before serving
/// - **Shutdown**: Closing the mediator and waiting for in-flight handlers
///
/// # Example
///
/// ```ignore
/// let mut system = ActivitySystem::new(context, 32);
/// system.initialize().await;
///
/// let app = system.router(&settings);
/// axum::serve(listener, app).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ActivitySystem {
    /// Client for submitting messages to the mediator
    pub client: MediatorClient,

    context: Arc<dyn DataContext>,
    phase: Phase,

    /// Dispatcher task handle (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl ActivitySystem {
    /// Spawns the mediator over `context`. The system starts in [`Phase::Initializing`].
    pub fn new(context: Arc<dyn DataContext>, buffer_size: usize) -> Self {
        let (mediator, client) = Mediator::new(buffer_size);
        let handle = tokio::spawn(mediator.run(context.clone()));

        Self {
            client,
            context,
            phase: Phase::Initializing,
            handle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Applies migrations, then seeds, then enters [`Phase::Serving`].
    ///
    /// Neither step can stop the transition: a migration failure is logged and
    /// seeding is skipped; a seed failure is logged and swallowed.
    pub async fn initialize(&mut self) -> BootReport {
        let report = match self.context.migrate().await {
            Err(e) => {
                error!(error = %e, "An error occurred during migration");
                BootReport {
                    migrated: false,
                    seeded: None,
                }
            }
            Ok(()) => {
                let seeded = match seed_data(self.context.as_ref()).await {
                    Ok(inserted) => Some(inserted),
                    Err(e) => {
                        error!(error = %e, "An error occurred while seeding");
                        None
                    }
                };
                BootReport {
                    migrated: true,
                    seeded,
                }
            }
        };

        self.phase = Phase::Serving;
        info!(?report, "System initialized");
        report
    }

    /// Builds the HTTP router bound to this system's mediator.
    pub fn router(&self, settings: &Settings) -> Router {
        api::router(
            AppState {
                mediator: self.client.clone(),
            },
            settings,
        )
    }

    /// Gracefully shuts down the mediator.
    ///
    /// The dispatcher exits once every [`MediatorClient`] clone is gone, so any
    /// router built from this system must be dropped first (as `axum::serve`
    /// does when it returns).
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Mediator task failed: {:?}", e);
            return Err(format!("Mediator task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
