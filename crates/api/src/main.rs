mod cli;

use std::sync::Arc;

use clap::Parser;
use extgate_api::{AppState, Settings, router, telemetry};
use extgate_catalog::{Catalog, CatalogSource, JsonFileSource, RefreshTicker, StaticSource};
use extgate_engine::UpdateEngine;
use tracing::{info, warn};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    telemetry::init()?;

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        settings.server.listen = listen;
    }
    if let Some(catalog) = cli.catalog {
        settings.catalog.file = Some(catalog);
    }

    let source: Arc<dyn CatalogSource> = match &settings.catalog.file {
        Some(path) => Arc::new(JsonFileSource::new(path)),
        None => Arc::new(StaticSource::offered()),
    };

    // Load once before accepting connections, then keep refreshing
    let catalog = Arc::new(Catalog::new());
    let ticker = RefreshTicker::new(catalog.clone(), source, settings.refresh_interval());
    match ticker.refresh_once().await {
        Ok(count) => info!(count, "Loaded extension catalog"),
        Err(e) => warn!("Initial catalog load failed, starting empty: {}", e),
    }
    let refresh = ticker.spawn();

    let engine = UpdateEngine::new(catalog, settings.engine_settings());
    let app = router(AppState::new(engine));

    let listener = tokio::net::TcpListener::bind(&settings.server.listen).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    refresh.abort();
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
