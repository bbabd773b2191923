use fallguard_core::models::answers::{AnswerField, QuestionnaireAnswers};
use fallguard_core::models::risk::{Recommendation, RiskLevel, RiskResult};

use crate::error::ScoringError;
use crate::questionnaire::Step;

/// Assign a risk tier. The first matching rule wins:
///
/// 1. frailty present → high, supervised activity
/// 2. every initial screening answer is no → low
/// 3. any severity answer is yes → high
/// 4. otherwise → intermediate
///
/// Rules 2 and 3 require their step to be fully answered and fail with
/// [`ScoringError::IncompleteAnswers`] otherwise. When screening is all no,
/// the severity step is never shown, so it is not required.
pub fn classify_risk_level(answers: &QuestionnaireAnswers) -> Result<RiskResult, ScoringError> {
    if answers.has_frailty == Some(true) {
        return Ok(RiskResult {
            level: RiskLevel::High,
            recommendation: Recommendation::ProfessionalAssessmentSupervised,
        });
    }

    require_complete(answers, Step::InitialScreening)?;
    if answers.all_false(&AnswerField::INITIAL_SCREENING) {
        return Ok(RiskResult {
            level: RiskLevel::Low,
            recommendation: Recommendation::MaintainRegimen,
        });
    }

    require_complete(answers, Step::Severity)?;
    if answers.any_true(&AnswerField::SEVERITY) {
        return Ok(RiskResult {
            level: RiskLevel::High,
            recommendation: Recommendation::ProfessionalAssessment,
        });
    }

    Ok(RiskResult {
        level: RiskLevel::Intermediate,
        recommendation: Recommendation::ExerciseAndMonitor,
    })
}

pub(crate) fn require_complete(
    answers: &QuestionnaireAnswers,
    step: Step,
) -> Result<(), ScoringError> {
    let missing = answers.missing(step.fields());
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScoringError::IncompleteAnswers { step, missing })
    }
}
