//! Fan-out runner for page search jobs

use std::time::Duration;

use futures::future::join_all;

use crate::upstream::UpstreamClient;

use super::{PageOutcome, PageSearchJob};

/// Dispatch one search job per page offset (`0..=max_pages`) and wait
/// for every one of them to reach a terminal state.
///
/// No job is started or finished in any guaranteed order, and no
/// result is handed to the classifier while a sibling is still
/// pending. There is no cross-job cancellation: a timed-out page does
/// not abort the others, so a slow page cannot suppress a valid hit
/// from a fast one. The returned batch always has `max_pages + 1`
/// entries.
pub async fn run_page_search(
    client: &UpstreamClient,
    file_id: &str,
    limit: u32,
    max_pages: u32,
    timeout: Duration,
) -> Vec<PageOutcome> {
    let jobs = (0..=max_pages).map(|offset| {
        let job = PageSearchJob {
            file_id: file_id.to_string(),
            limit,
            offset,
            timeout,
        };
        job.run(client)
    });

    join_all(jobs).await
}
