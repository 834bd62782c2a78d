use std::sync::Arc;

use activities_api::lifecycle::{setup_tracing, ActivitySystem, Settings};
use activities_api::persistence::SqliteContext;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("invalid configuration")?;
    setup_tracing();

    info!(environment = ?settings.environment, "Starting activities API");

    let context = SqliteContext::connect(&settings.database_url, 5)
        .await
        .context("could not open database")?;

    let mut system = ActivitySystem::new(Arc::new(context), settings.mediator_buffer);
    system.initialize().await;

    let app = system.router(&settings);
    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .context("failed to bind listener")?;

    info!(addr = %settings.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running server")?;

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
