// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use dive_sessions::application::dive_log_service::DiveLogService;
use dive_sessions::application::streaming_service::StreamingDiveLogService;
use dive_sessions::infrastructure::config::load_settings;
use dive_sessions::infrastructure::influx_source::InfluxHealthSource;
use dive_sessions::presentation::app_state::AppState;
use dive_sessions::presentation::router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration; a non-positive gap threshold stops startup here
    let settings = load_settings()?;
    let segmenter = settings.engine.segmenter()?;

    // Create health data source (infrastructure layer)
    let source = Arc::new(InfluxHealthSource::new(settings.source));

    // Create services (application layer)
    let dive_log_service = DiveLogService::new(source, segmenter);
    let streaming_service = StreamingDiveLogService::new(dive_log_service.clone());

    let state = Arc::new(AppState {
        dive_log_service,
        streaming_service,
    });

    // Start server (presentation layer)
    let addr: SocketAddr = settings.server.bind_addr.parse()?;
    tracing::info!(
        "Starting dive-sessions service on {} (gap threshold {}s)",
        addr,
        segmenter.gap_threshold().num_seconds()
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
