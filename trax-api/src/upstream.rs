//! HTTP client for the upstream processing service
//!
//! The upstream offers no lookup-by-id; the listing must be scanned
//! page by page (see [`crate::jobs`]). This client is a thin,
//! stateless wrapper over one call each: it translates transport and
//! HTTP failures into [`UpstreamError`] and nothing more. Retry
//! policy, deadlines and fan-out belong to the callers.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use trax_common::{FileRecord, Segment};

const USER_AGENT: &str = concat!("trax-api/", env!("CARGO_PKG_VERSION"));

/// Upstream call failures, one variant per failure class.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network-level failure (connect, DNS, reset, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status
    #[error("upstream returned HTTP {0}")]
    Protocol(u16),

    /// Upstream answered 2xx but the body did not parse
    #[error("invalid upstream payload: {0}")]
    Decode(String),
}

/// Client for the processing service REST API.
///
/// Stateless and cheap to clone; a single instance is shared across
/// all concurrently running jobs without synchronization. No timeout
/// is configured on the inner client: the per-call deadline is owned
/// by the job layer.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(base_url: &str) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One page of the file listing.
    pub async fn list_files(
        &self,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<FileRecord>, UpstreamError> {
        self.get_json(
            "/api/file/all",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Extended metadata for one file, kept as a raw JSON object so
    /// the aggregator can merge it additively.
    pub async fn file_details(&self, file_id: &str) -> Result<Map<String, Value>, UpstreamError> {
        self.get_json(&format!("/api/file/details/{}", file_id), &[])
            .await
    }

    /// Ordered transcript segments for one file.
    pub async fn file_segments(&self, file_id: &str) -> Result<Vec<Segment>, UpstreamError> {
        self.get_json(&format!("/api/file/segments/{}", file_id), &[])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "calling processing API");

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                url = %url,
                status = status.as_u16(),
                "processing API returned an error status"
            );
            return Err(UpstreamError::Protocol(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
