//! Page search job: one listing call, filtered for the target id

use std::time::Duration;

use crate::upstream::UpstreamClient;

use super::{FailureReason, JobOutcome, PageOutcome};

/// One unit of the paginated search: fetch a single page of the
/// listing under a deadline and scan it for the target file id.
#[derive(Debug, Clone)]
pub struct PageSearchJob {
    pub file_id: String,
    pub limit: u32,
    pub offset: u32,
    pub timeout: Duration,
}

impl PageSearchJob {
    /// Run the job to its terminal outcome. Never returns an error:
    /// timeouts and upstream failures become `Failed` outcomes that
    /// feed the classifier.
    pub async fn run(self, client: &UpstreamClient) -> PageOutcome {
        let call = client.list_files(self.limit, self.offset);
        let outcome = match tokio::time::timeout(self.timeout, call).await {
            Err(_elapsed) => {
                tracing::warn!(
                    file_id = %self.file_id,
                    offset = self.offset,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "page listing call timed out"
                );
                JobOutcome::Failed(FailureReason::Timeout)
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    file_id = %self.file_id,
                    offset = self.offset,
                    error = %err,
                    "page listing call failed"
                );
                JobOutcome::Failed(err.into())
            }
            // Linear scan, first match wins; pages are non-overlapping
            // in practice and the classifier tolerates overlap anyway.
            Ok(Ok(page)) => match page.into_iter().find(|r| r.file_id == self.file_id) {
                Some(record) => {
                    tracing::info!(
                        file_id = %self.file_id,
                        page = self.offset + 1,
                        status = %record.processing_status,
                        "file found in listing"
                    );
                    JobOutcome::Found(record)
                }
                None => JobOutcome::NotFoundOnPage,
            },
        };

        PageOutcome {
            offset: self.offset,
            outcome,
        }
    }
}
