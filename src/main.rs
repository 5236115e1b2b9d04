use clap::Parser;
use decentralized_search::api;
use decentralized_search::config::Settings;
use decentralized_search::response::ResponseFramer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting search node on {}", settings.bind);

    // 1. Aggregator (discovery + catalog client):
    let aggregator = Arc::new(settings.build_aggregator()?);
    tracing::info!(
        "Catalog service at {}, discovery: {}",
        aggregator.catalog(),
        settings.discovery_type
    );

    // 2. HTTP Router:
    let app = api::router(aggregator, Arc::new(ResponseFramer::catalog()));

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    tracing::info!("HTTP server listening on {}", settings.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
