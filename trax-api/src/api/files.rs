//! Presentation endpoint for assembled file records

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use trax_common::FileRecord;

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/presentation/files/:file_id
///
/// Returns the fully merged record (status, metadata, segments), or
/// 404 when the id is absent from the scanned pages and 400 when the
/// file is not ready or the upstream cannot be reached.
pub async fn file_details(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Json<FileRecord>> {
    let record = state.aggregator.assemble(&file_id).await?;
    Ok(Json(record))
}

/// Build presentation routes
pub fn file_routes() -> Router<AppState> {
    Router::new().route("/api/presentation/files/:file_id", get(file_details))
}
