use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fallguard_analytics::error::AnalyticsError;
use fallguard_core::error::CoreError;
use fallguard_scoring::ScoringError;
use fallguard_scoring::flow::FlowError;
use fallguard_storage::error::StorageError;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The request is well-formed but not allowed in the current state.
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong, please try again".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Serialization(_) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ScoringError> for ApiError {
    fn from(e: ScoringError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<FlowError> for ApiError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::AgeGroupRequired
            | FlowError::StepIncomplete { .. }
            | FlowError::NotOnStep { .. } => ApiError::BadRequest(e.to_string()),
            FlowError::SafetyNoticePending
            | FlowError::NoSafetyNotice
            | FlowError::AtFirstStep
            | FlowError::AtLastStep => ApiError::Conflict(e.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("not found: {key}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<AnalyticsError> for ApiError {
    fn from(e: AnalyticsError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
