//! Concurrent fan-out against the paginated processing API
//!
//! The upstream listing cannot be queried by id, so finding one file
//! means scanning every page up to a configured ceiling. One job is
//! dispatched per page offset; each job always reaches a terminal
//! outcome (found, not on this page, or failed) and failures are
//! collected rather than propagated, so one dead or slow page can
//! never suppress a hit from another.

pub mod classify;
pub mod detail;
pub mod runner;
pub mod search;

pub use classify::{classify, AggregateOutcome};
pub use detail::{fetch_details, fetch_segments};
pub use runner::run_page_search;
pub use search::PageSearchJob;

use trax_common::FileRecord;

use crate::upstream::UpstreamError;

/// Why a single job failed to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The per-call deadline elapsed before the upstream answered.
    Timeout,
    /// Network-level failure, or a 2xx body that did not parse.
    Transport(String),
    /// Upstream answered with the given non-2xx status.
    Protocol(u16),
}

impl From<UpstreamError> for FailureReason {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(msg) => FailureReason::Transport(msg),
            UpstreamError::Protocol(status) => FailureReason::Protocol(status),
            UpstreamError::Decode(msg) => FailureReason::Transport(msg),
        }
    }
}

/// Terminal state of one concurrent unit of work.
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    /// The page contained the target id.
    Found(FileRecord),
    /// The page completed but did not contain the target id.
    NotFoundOnPage,
    /// The call did not complete.
    Failed(FailureReason),
}

/// A [`JobOutcome`] tagged with the page offset that produced it.
///
/// The offset keys the deterministic tie-break when duplicate ids
/// show up on several pages; it makes classification independent of
/// completion order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutcome {
    pub offset: u32,
    pub outcome: JobOutcome,
}
