//! Request-scoped assembly of one file record
//!
//! Three strictly sequential stages: the paginated search resolves
//! first, metadata is fetched only for a ready record, segments only
//! after metadata succeeded. No stage is retried, and a response is
//! never built from a partially merged record; the first failure
//! rejects the whole request.

use std::time::Duration;

use trax_common::FileRecord;

use crate::config::GatewayConfig;
use crate::error::FetchError;
use crate::jobs::{self, AggregateOutcome};
use crate::upstream::UpstreamClient;

/// Orchestrates search, classification, and the two detail fetches
/// for one requested file id.
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: UpstreamClient,
    page_size: u32,
    max_pages: u32,
    timeout: Duration,
}

impl Aggregator {
    pub fn new(client: UpstreamClient, config: &GatewayConfig) -> Self {
        Self {
            client,
            page_size: config.page_size,
            max_pages: config.max_pages,
            timeout: config.request_timeout,
        }
    }

    /// Assemble the full record for `file_id`, or reject.
    pub async fn assemble(&self, file_id: &str) -> Result<FileRecord, FetchError> {
        let outcomes = jobs::run_page_search(
            &self.client,
            file_id,
            self.page_size,
            self.max_pages,
            self.timeout,
        )
        .await;

        let mut record = match jobs::classify(outcomes) {
            AggregateOutcome::Ready(record) => record,
            AggregateOutcome::WrongStatus(record) => {
                return Err(FetchError::NotReady {
                    file_id: file_id.to_string(),
                    status: record.processing_status.to_string(),
                })
            }
            AggregateOutcome::NotFound => {
                return Err(FetchError::NotFound {
                    file_id: file_id.to_string(),
                    max_pages: self.max_pages,
                })
            }
            AggregateOutcome::Unreachable => {
                return Err(FetchError::Unreachable(
                    "no page listing call succeeded".to_string(),
                ))
            }
        };

        let details = jobs::fetch_details(&self.client, file_id, self.timeout).await?;
        record.merge_details(details);

        let segments = jobs::fetch_segments(&self.client, file_id, self.timeout).await?;
        record.attach_segments(segments);

        Ok(record)
    }
}
