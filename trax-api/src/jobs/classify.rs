//! Outcome classifier for a completed search batch
//!
//! A pure function over the terminal outcomes of every page job.
//! Precedence, first match wins:
//!
//! 1. every job failed → [`AggregateOutcome::Unreachable`];
//! 2. at least one page found the id → `Ready` or `WrongStatus`
//!    depending on the chosen record's processing status;
//! 3. otherwise (a mix of clean misses and failures, zero hits) →
//!    [`AggregateOutcome::NotFound`].
//!
//! A found-but-unready record therefore outranks failures on other
//! pages, and "unreachable" is only declared when literally nothing
//! succeeded.
//!
//! Duplicate hits: the listing gives no non-overlap guarantee, so the
//! same id can appear on several pages. The tie-break is the
//! lowest-offset hit in FINISHED status, falling back to the
//! lowest-offset hit overall. Preferring a finished duplicate means a
//! stale unfinished copy on an earlier page cannot hide a ready one.

use trax_common::FileRecord;

use super::{JobOutcome, PageOutcome};

/// Business verdict over one completed batch of page outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateOutcome {
    /// Found, processing complete; assembly may proceed.
    Ready(FileRecord),
    /// Found, but processing has not finished (or failed).
    WrongStatus(FileRecord),
    /// Every page that answered came back without the id.
    NotFound,
    /// Not a single page call succeeded.
    Unreachable,
}

/// Classify a completed batch. Deterministic: the verdict depends
/// only on the outcome set, never on completion order. The batch must
/// be complete (every dispatched job terminal) and non-empty; the
/// runner guarantees both.
pub fn classify(outcomes: Vec<PageOutcome>) -> AggregateOutcome {
    if outcomes
        .iter()
        .all(|o| matches!(o.outcome, JobOutcome::Failed(_)))
    {
        return AggregateOutcome::Unreachable;
    }

    let mut found: Vec<(u32, FileRecord)> = outcomes
        .into_iter()
        .filter_map(|o| match o.outcome {
            JobOutcome::Found(record) => Some((o.offset, record)),
            _ => None,
        })
        .collect();

    if found.is_empty() {
        return AggregateOutcome::NotFound;
    }

    found.sort_by_key(|(offset, _)| *offset);

    if let Some(pos) = found
        .iter()
        .position(|(_, record)| record.processing_status.is_finished())
    {
        let (_, record) = found.swap_remove(pos);
        return AggregateOutcome::Ready(record);
    }

    let (_, record) = found.remove(0);
    AggregateOutcome::WrongStatus(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::FailureReason;
    use trax_common::ProcessingStatus;

    fn found(offset: u32, status: ProcessingStatus) -> PageOutcome {
        let mut record = FileRecord::new("target", status);
        record.file_name = Some(format!("page-{}.mp3", offset));
        PageOutcome {
            offset,
            outcome: JobOutcome::Found(record),
        }
    }

    fn miss(offset: u32) -> PageOutcome {
        PageOutcome {
            offset,
            outcome: JobOutcome::NotFoundOnPage,
        }
    }

    fn failed(offset: u32, reason: FailureReason) -> PageOutcome {
        PageOutcome {
            offset,
            outcome: JobOutcome::Failed(reason),
        }
    }

    #[test]
    fn all_failed_is_unreachable_for_any_batch_size() {
        for n in 1..=8 {
            let outcomes = (0..n)
                .map(|offset| failed(offset, FailureReason::Timeout))
                .collect();
            assert_eq!(
                classify(outcomes),
                AggregateOutcome::Unreachable,
                "batch size {}",
                n
            );
        }
    }

    #[test]
    fn mixed_failure_reasons_still_unreachable() {
        let outcomes = vec![
            failed(0, FailureReason::Timeout),
            failed(1, FailureReason::Transport("connection refused".into())),
            failed(2, FailureReason::Protocol(503)),
        ];
        assert_eq!(classify(outcomes), AggregateOutcome::Unreachable);
    }

    #[test]
    fn misses_and_failures_without_a_hit_is_not_found() {
        let outcomes = vec![
            miss(0),
            failed(1, FailureReason::Timeout),
            miss(2),
            failed(3, FailureReason::Protocol(500)),
        ];
        assert_eq!(classify(outcomes), AggregateOutcome::NotFound);
    }

    #[test]
    fn finished_hit_beats_failures_on_other_pages() {
        let outcomes = vec![
            failed(0, FailureReason::Timeout),
            miss(1),
            found(2, ProcessingStatus::Finished),
            failed(3, FailureReason::Transport("reset".into())),
        ];
        match classify(outcomes) {
            AggregateOutcome::Ready(record) => assert_eq!(record.file_id, "target"),
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn unfinished_hit_beats_failures_on_other_pages() {
        let outcomes = vec![
            failed(0, FailureReason::Timeout),
            found(1, ProcessingStatus::Processing),
        ];
        match classify(outcomes) {
            AggregateOutcome::WrongStatus(record) => {
                assert_eq!(record.processing_status, ProcessingStatus::Processing)
            }
            other => panic!("expected WrongStatus, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_hits_prefer_finished_over_earlier_offset() {
        // An unfinished copy on page 1 must not hide the finished
        // copy on page 5.
        let outcomes = vec![
            found(0, ProcessingStatus::Processing),
            found(4, ProcessingStatus::Finished),
            miss(2),
        ];
        match classify(outcomes) {
            AggregateOutcome::Ready(record) => {
                assert_eq!(record.file_name.as_deref(), Some("page-4.mp3"))
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_finished_hits_pick_lowest_offset() {
        let outcomes = vec![
            found(3, ProcessingStatus::Finished),
            found(1, ProcessingStatus::Finished),
        ];
        match classify(outcomes) {
            AggregateOutcome::Ready(record) => {
                assert_eq!(record.file_name.as_deref(), Some("page-1.mp3"))
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_unfinished_hits_pick_lowest_offset() {
        let outcomes = vec![
            found(2, ProcessingStatus::Failed),
            found(0, ProcessingStatus::Processing),
        ];
        match classify(outcomes) {
            AggregateOutcome::WrongStatus(record) => {
                assert_eq!(record.file_name.as_deref(), Some("page-0.mp3"))
            }
            other => panic!("expected WrongStatus, got {:?}", other),
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let outcomes = vec![
            found(1, ProcessingStatus::Processing),
            found(3, ProcessingStatus::Finished),
            failed(0, FailureReason::Timeout),
            miss(2),
        ];
        let first = classify(outcomes.clone());
        let second = classify(outcomes);
        assert_eq!(first, second);
    }

    #[test]
    fn completion_order_does_not_change_the_verdict() {
        let mut outcomes = vec![
            failed(0, FailureReason::Timeout),
            found(1, ProcessingStatus::Finished),
            miss(2),
            found(3, ProcessingStatus::Finished),
        ];
        let forward = classify(outcomes.clone());
        outcomes.reverse();
        assert_eq!(classify(outcomes), forward);
    }
}
