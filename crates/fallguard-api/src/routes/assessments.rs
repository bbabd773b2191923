use axum::Json;
use axum::extract::{Query, State};
use fallguard_analytics::{AnalyticsEvent, events};
use fallguard_core::models::answers::QuestionnaireAnswers;
use fallguard_core::models::locale::Locale;
use fallguard_core::models::risk::{FallProbabilityResult, Recommendation, RiskLevel};
use fallguard_scoring::questionnaire::{self, Step};
use fallguard_scoring::{Assessment, score};
use serde::Serialize;

use super::LangQuery;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ScoreResponse {
    locale: Locale,
    level: RiskLevel,
    recommendation: Recommendation,
    recommendation_text: String,
    probability: FallProbabilityResult,
    /// Present when any severity or frailty answer is yes.
    safety_notice: Option<String>,
}

impl ScoreResponse {
    fn new(assessment: &Assessment, answers: &QuestionnaireAnswers, locale: Locale) -> Self {
        let safety_notice = answers
            .any_true(Step::Severity.fields())
            .then(|| questionnaire::safety_notice().get(locale).to_string());

        Self {
            locale,
            level: assessment.risk.level,
            recommendation: assessment.risk.recommendation,
            recommendation_text: assessment.risk.recommendation_text(locale).to_string(),
            probability: assessment.probability,
            safety_notice,
        }
    }
}

pub async fn score_assessment(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Json(answers): Json<QuestionnaireAnswers>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let locale = query.resolve(state.default_locale)?;
    let assessment = score(&answers)?;

    if let Ok(event) = AnalyticsEvent::new(events::ASSESSMENT_COMPLETED) {
        let mut event = event
            .with("risk_level", assessment.risk.level.as_str())
            .with(
                "probability",
                assessment.probability.post_test_probability_percent,
            )
            .with("locale", locale.as_str());
        if let Some(age_group) = answers.age_group {
            event = event.with("age_group", age_group.as_str());
        }
        state.analytics.track(&event);
    }

    Ok(Json(ScoreResponse::new(&assessment, &answers, locale)))
}
