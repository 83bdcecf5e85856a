//! trax-api - Transcript Presentation Gateway
//!
//! Assembles file records from the upstream processing API and
//! serves them on a single presentation endpoint. The upstream only
//! offers a paginated listing, so every lookup fans out one
//! concurrent page request per offset up to the configured ceiling.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use trax_api::config::{Cli, GatewayConfig};
use trax_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting trax-api (Transcript Presentation Gateway)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let toml = GatewayConfig::load_toml(cli.config.as_deref())?;
    let config = GatewayConfig::resolve(&cli, &toml)?;

    info!("Upstream: {}", config.upstream_base_url);
    info!(
        "Search fan-out: {} pages of {} records, {}s per-call timeout",
        config.max_pages + 1,
        config.page_size,
        config.request_timeout.as_secs()
    );

    let state = AppState::new(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
