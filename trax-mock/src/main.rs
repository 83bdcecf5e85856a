//! trax-mock - Mock Processing Service
//!
//! Local stand-in for the upstream processing API: paginated file
//! listing plus details and segments endpoints over fixture data.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
#[command(name = "trax-mock", about = "Mock processing service")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 5731)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let app = trax_mock::build_router();

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", cli.port)).await?;
    info!("Starting trax-mock (Mock Processing Service)");
    info!("Listening on http://127.0.0.1:{}", cli.port);

    axum::serve(listener, app).await?;

    Ok(())
}
