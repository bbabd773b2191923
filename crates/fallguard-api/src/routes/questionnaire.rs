use axum::Json;
use axum::extract::{Query, State};
use fallguard_core::models::answers::{AgeGroup, AnswerField};
use fallguard_core::models::locale::Locale;
use fallguard_scoring::flow::{FlowAction, FlowState, SafetyNotice};
use fallguard_scoring::questionnaire::{self, Step};
use serde::{Deserialize, Serialize};

use super::LangQuery;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct QuestionView {
    field: AnswerField,
    prompt: String,
}

#[derive(Serialize)]
pub struct StepView {
    step: Step,
    index: usize,
    title: String,
    questions: Vec<QuestionView>,
}

#[derive(Serialize)]
pub struct AgeGroupOption {
    value: AgeGroup,
    label: String,
}

#[derive(Serialize)]
pub struct QuestionnaireView {
    locale: Locale,
    steps: Vec<StepView>,
    age_groups: Vec<AgeGroupOption>,
    safety_notice: String,
}

pub async fn get_questionnaire(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> Result<Json<QuestionnaireView>, ApiError> {
    let locale = query.resolve(state.default_locale)?;

    let steps = questionnaire::questionnaire()
        .iter()
        .map(|definition| StepView {
            step: definition.step,
            index: definition.step.index(),
            title: definition.title.get(locale).to_string(),
            questions: definition
                .questions
                .iter()
                .map(|q| QuestionView {
                    field: q.field,
                    prompt: q.prompt.get(locale).to_string(),
                })
                .collect(),
        })
        .collect();

    let age_groups = AgeGroup::ALL
        .into_iter()
        .map(|value| AgeGroupOption {
            value,
            label: questionnaire::age_group_label(value).get(locale).to_string(),
        })
        .collect();

    Ok(Json(QuestionnaireView {
        locale,
        steps,
        age_groups,
        safety_notice: questionnaire::safety_notice().get(locale).to_string(),
    }))
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    #[serde(default)]
    state: FlowState,
    action: FlowAction,
}

#[derive(Serialize)]
pub struct TransitionResponse {
    state: FlowState,
    can_advance: bool,
    /// Present while the safety notice is waiting for acknowledgement.
    safety_notice: Option<String>,
}

/// Apply one user action to the client's flow state. The posted state is
/// reconciled against its answers first, so a client cannot move past the
/// severity step without an acknowledged safety notice. Acknowledgement is
/// still the client's claim; see [`FlowState::reconciled`].
pub async fn transition(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<TransitionResponse>, ApiError> {
    let locale = query.resolve(state.default_locale)?;
    let next = request.state.apply(request.action)?;

    let safety_notice = (next.safety_notice == SafetyNotice::Pending)
        .then(|| questionnaire::safety_notice().get(locale).to_string());

    Ok(Json(TransitionResponse {
        can_advance: next.can_advance(),
        safety_notice,
        state: next,
    }))
}
