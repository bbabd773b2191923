use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use fallguard_analytics::{AnalyticsEvent, events};
use fallguard_core::models::lead::{LeadRequest, LeadSubmission};
use fallguard_scoring::score;
use fallguard_storage::store::SubmissionStore;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct LeadCreated {
    id: Uuid,
}

/// Capture a lead. Risk results are recomputed from the submitted answers;
/// anything the client computed is ignored.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<LeadRequest>,
) -> Result<(StatusCode, Json<LeadCreated>), ApiError> {
    let request = request.validate()?;

    let assessment = request.answers.as_ref().map(score).transpose()?;
    let submission = LeadSubmission::new(
        request,
        assessment.map(|a| a.risk),
        assessment.map(|a| a.probability),
    );

    state.store.save(&submission).await?;

    if let Ok(event) = AnalyticsEvent::new(events::LEAD_SUBMITTED) {
        let mut event = event
            .with("source", submission.source.as_str())
            .with("locale", submission.locale.as_str())
            .with("has_assessment", submission.risk.is_some());
        if let Some(risk) = &submission.risk {
            event = event.with("risk_level", risk.level.as_str());
        }
        state.analytics.track(&event);
    }

    tracing::info!(id = %submission.id, "lead captured");
    Ok((StatusCode::CREATED, Json(LeadCreated { id: submission.id })))
}
