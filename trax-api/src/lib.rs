//! trax-api - transcript presentation gateway
//!
//! Exposes one read endpoint that assembles a file record (status,
//! metadata, transcript segments) from an upstream processing API
//! that only offers a paginated listing. The search fans out one
//! concurrent listing call per page offset, tolerates partial
//! failure, classifies the batch into a single verdict, and only
//! then performs the two dependent detail calls.

pub mod aggregate;
pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod upstream;

pub use crate::error::{ApiError, ApiResult};

use anyhow::Context;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::aggregate::Aggregator;
use crate::config::GatewayConfig;
use crate::upstream::UpstreamClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Request pipeline: search, classify, merge
    pub aggregator: Aggregator,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = UpstreamClient::new(&config.upstream_base_url)
            .context("failed to build upstream HTTP client")?;

        Ok(Self {
            aggregator: Aggregator::new(client, config),
            startup_time: Utc::now(),
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::file_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
