use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use fallguard_analytics::AnalyticsEvent;

use crate::error::ApiError;
use crate::state::AppState;

/// Accept an analytics event from the web client. Names the service emits
/// itself are refused.
pub async fn track_event(
    State(state): State<AppState>,
    Json(event): Json<AnalyticsEvent>,
) -> Result<StatusCode, ApiError> {
    event.validate_client()?;
    state.analytics.track(&event);
    Ok(StatusCode::ACCEPTED)
}
