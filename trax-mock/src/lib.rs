//! Mock upstream processing service
//!
//! Stands in for the real processing API during local development:
//! a fixed listing of ten files (one finished, the rest duplicates
//! of an unfinished id, mirroring the duplicate-across-pages
//! behavior seen upstream), plus canned details and segments. Query
//! parameters that fail to parse fall back to their defaults instead
//! of erroring, like the service it imitates.

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use trax_common::{FileRecord, ProcessingStatus, Segment};

/// The one id the fixture listing reports as FINISHED.
pub const FINISHED_FILE_ID: &str = "aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";
/// The id duplicated across the rest of the listing, never finished.
pub const UNFINISHED_FILE_ID: &str = "aaaaaaaa-bbbb-cccc-dddd-ffffffffffff";

const DEFAULT_LIMIT: usize = 5;

/// The fixed listing served by `/api/file/all`.
pub fn fixture_files() -> Vec<FileRecord> {
    let unfinished_statuses = [
        ProcessingStatus::Processing,
        ProcessingStatus::Processing,
        ProcessingStatus::Processing,
        ProcessingStatus::Processing,
        ProcessingStatus::Failed,
        ProcessingStatus::Processing,
        ProcessingStatus::Failed,
        ProcessingStatus::Processing,
        ProcessingStatus::Failed,
    ];

    let mut files = vec![FileRecord::new(FINISHED_FILE_ID, ProcessingStatus::Finished)];
    files.extend(
        unfinished_statuses
            .into_iter()
            .map(|status| FileRecord::new(UNFINISHED_FILE_ID, status)),
    );
    files
}

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<String>,
    offset: Option<String>,
}

impl ListParams {
    // Unparseable values fall back to defaults, matching the real
    // service's leniency.
    fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LIMIT)
    }

    fn offset(&self) -> usize {
        self.offset
            .as_deref()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }
}

/// GET /api/file/all?limit=&offset=
///
/// `offset` addresses a page, not a record: the slice served is
/// `offset*limit .. (offset+1)*limit`. Past the end of the listing
/// the page is empty, never an error.
async fn list_files(Query(params): Query<ListParams>) -> Json<Vec<FileRecord>> {
    let files = fixture_files();
    let limit = params.limit();
    let start = params.offset().saturating_mul(limit).min(files.len());
    let end = start.saturating_add(limit).min(files.len());

    tracing::debug!(start, end, "serving listing page");
    Json(files[start..end].to_vec())
}

/// GET /api/file/details/:file_id
async fn file_details(Path(file_id): Path<String>) -> Json<Value> {
    Json(json!({
        "fileId": file_id,
        "fileName": "morning-briefing-ep12.mp3",
        "fileLength": 1863,
        "mp3Path": format!("http://files.example.com/mp3/{}.mp3", file_id),
        "originalFilePath": format!("http://files.example.com/raw/{}.wav", file_id),
        "seriesTitle": "Morning Briefing",
    }))
}

/// GET /api/file/segments/:file_id
async fn file_segments(Path(file_id): Path<String>) -> Json<Vec<Segment>> {
    let texts = [
        (0.0, 4.2, "Good morning, and welcome back to the show."),
        (4.2, 9.8, "Today we are looking at the week ahead."),
        (9.8, 15.1, "But first, a quick recap of yesterday."),
    ];

    let segments = texts
        .iter()
        .enumerate()
        .map(|(i, (start, end, text))| Segment {
            segment_id: format!("{}-seg-{}", file_id, i),
            file_id: file_id.clone(),
            text: (*text).to_string(),
            start_time: *start,
            end_time: *end,
        })
        .collect();

    Json(segments)
}

/// Build the mock upstream router
pub fn build_router() -> Router {
    Router::new()
        .route("/api/file/all", get(list_files))
        .route("/api/file/details/:file_id", get(file_details))
        .route("/api/file/segments/:file_id", get(file_segments))
}
