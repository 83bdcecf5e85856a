//! Single-call fetchers for file metadata and segments
//!
//! Same deadline and failure semantics as one page search job, minus
//! pagination and id filtering. There is no fan-out ambiguity here,
//! so every failure collapses to the one business meaning: the
//! upstream was not reachable in time.

use std::future::Future;
use std::time::Duration;

use serde_json::{Map, Value};
use trax_common::Segment;

use crate::error::FetchError;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Fetch the extended metadata object for one file.
pub async fn fetch_details(
    client: &UpstreamClient,
    file_id: &str,
    timeout: Duration,
) -> Result<Map<String, Value>, FetchError> {
    run_single("details", file_id, timeout, client.file_details(file_id)).await
}

/// Fetch the ordered transcript segments for one file.
pub async fn fetch_segments(
    client: &UpstreamClient,
    file_id: &str,
    timeout: Duration,
) -> Result<Vec<Segment>, FetchError> {
    run_single("segments", file_id, timeout, client.file_segments(file_id)).await
}

async fn run_single<T>(
    operation: &str,
    file_id: &str,
    timeout: Duration,
    call: impl Future<Output = Result<T, UpstreamError>>,
) -> Result<T, FetchError> {
    match tokio::time::timeout(timeout, call).await {
        Err(_elapsed) => {
            tracing::warn!(file_id = %file_id, operation, "upstream call timed out");
            Err(FetchError::Unreachable(format!(
                "{} call timed out",
                operation
            )))
        }
        Ok(Err(err)) => {
            tracing::warn!(file_id = %file_id, operation, error = %err, "upstream call failed");
            Err(FetchError::Unreachable(err.to_string()))
        }
        Ok(Ok(value)) => Ok(value),
    }
}
