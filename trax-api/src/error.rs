//! Error types for trax-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Business-level rejection from the aggregation pipeline.
///
/// Job-level failures (timeouts, transport and protocol errors) never
/// escape the job layer as raised faults; by the time a request is
/// rejected it is one of these three.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The id was absent from every page that answered.
    #[error("File {file_id} not found in {max_pages} pages.")]
    NotFound { file_id: String, max_pages: u32 },

    /// The file exists but processing has not finished.
    #[error("File {file_id} is not in FINISHED status (currently {status}).")]
    NotReady { file_id: String, status: String },

    /// The upstream could not be reached, either during the paginated
    /// search (every page failed) or on a detail call.
    #[error("Could not reach processing API: {0}")]
    Unreachable(String),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            FetchError::NotReady { .. } => ApiError::BadRequest(err.to_string()),
            // Upstream unavailability is deliberately a 4xx, not a
            // 5xx: the caller asked for a file the system cannot
            // vouch for right now. Inherited policy, kept as-is.
            FetchError::Unreachable(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err: ApiError = FetchError::NotFound {
            file_id: "abc".into(),
            max_pages: 200,
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn not_ready_maps_to_bad_request() {
        let err: ApiError = FetchError::NotReady {
            file_id: "abc".into(),
            status: "PROCESSING".into(),
        }
        .into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn unreachable_maps_to_bad_request_not_server_error() {
        let err: ApiError = FetchError::Unreachable("timed out".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
