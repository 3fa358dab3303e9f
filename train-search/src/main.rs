use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use train_search::cache::CachedSearch;
use train_search::config::AppConfig;
use train_search::shared::SharedEngine;
use train_search::sources::CsvSourceProvider;
use train_search::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().await?;
    let provider = Arc::new(CsvSourceProvider::new(config.provider_config())?);

    // Load every source up front (fail fast if any is unavailable)
    info!(sources = config.sources.len(), "loading schedule sources");
    let shared = SharedEngine::load(provider.as_ref(), config.engine_config()).await?;
    let report = shared.snapshot().await.engine.report().clone();
    info!(
        records = report.schedule_records,
        dropped = report.dropped(),
        timetable = report.timetable.accepted,
        "schedule data loaded"
    );

    let state = AppState::new(CachedSearch::new(shared, &config.cache));

    // Spawn background task to reload all sources periodically
    if let Some(period) = config.server.refresh_interval() {
        let search = state.search.clone();
        let provider = provider.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // First tick is immediate, skip it
            loop {
                interval.tick().await;
                match search.refresh(provider.as_ref()).await {
                    Ok(generation) => info!(generation, "reloaded schedule data"),
                    Err(e) => error!(error = %e, "failed to reload schedule data"),
                }
            }
        });
    }

    let app = create_router(state);

    let addr = config.server.addr;
    info!("Train search listening on http://{addr}");
    info!("  GET  /health  - Health check");
    info!("  GET  /search  - Search (source, destination, date query params)");
    info!("  POST /search  - Search (form body)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
