//! Post-test fall probability by the likelihood-ratio method.
//!
//! The age-group prior is converted to odds, multiplied by one likelihood
//! ratio per risk factor, and converted back to a percentage.

use fallguard_core::models::answers::{AgeGroup, AnswerField, QuestionnaireAnswers};
use fallguard_core::models::risk::FallProbabilityResult;

use crate::classify::require_complete;
use crate::error::ScoringError;
use crate::questionnaire::Step;

/// Likelihood ratios for one risk factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LikelihoodRatio {
    pub field: AnswerField,
    /// The answer that indicates risk. Physical tests indicate risk when
    /// failed, i.e. answered `false`.
    pub risk_when: bool,
    pub at_risk: f64,
    pub protective: f64,
}

impl LikelihoodRatio {
    const fn new(field: AnswerField, risk_when: bool, at_risk: f64, protective: f64) -> Self {
        Self {
            field,
            risk_when,
            at_risk,
            protective,
        }
    }

    pub fn ratio_for(&self, answer: bool) -> f64 {
        if answer == self.risk_when {
            self.at_risk
        } else {
            self.protective
        }
    }
}

pub const LIKELIHOOD_RATIOS: [LikelihoodRatio; 11] = [
    LikelihoodRatio::new(AnswerField::FallenLastYear, true, 1.8, 0.8),
    LikelihoodRatio::new(AnswerField::TakingPsychoactiveMeds, true, 1.4, 0.8),
    LikelihoodRatio::new(AnswerField::DifficultyWithAdl, true, 1.4, 0.8),
    LikelihoodRatio::new(AnswerField::FearfulOfFalling, true, 1.4, 0.9),
    LikelihoodRatio::new(AnswerField::UseAssistiveDevice, true, 1.3, 0.9),
    LikelihoodRatio::new(AnswerField::TandemStance22, false, 3.0, 0.4),
    LikelihoodRatio::new(AnswerField::TandemStance30, false, 1.3, 0.8),
    LikelihoodRatio::new(AnswerField::TandemWalk, false, 1.3, 0.2),
    LikelihoodRatio::new(AnswerField::SitToStand12, false, 1.6, 0.7),
    LikelihoodRatio::new(AnswerField::SitToStand30, false, 3.9, 0.4),
    LikelihoodRatio::new(AnswerField::SingleLimbStance, false, 1.9, 0.9),
];

/// Estimate the probability of a fall in the next 12 months.
///
/// `age_group` selects the prior; `None` fails with
/// [`ScoringError::MissingPrior`]. Every factor in [`LIKELIHOOD_RATIOS`] must
/// be answered.
pub fn estimate_fall_probability(
    answers: &QuestionnaireAnswers,
    age_group: Option<AgeGroup>,
) -> Result<FallProbabilityResult, ScoringError> {
    let age_group = age_group.ok_or(ScoringError::MissingPrior)?;

    require_complete(answers, Step::InitialScreening)?;
    require_complete(answers, Step::PhysicalTests)?;

    let pre_test_probability = age_group.pre_test_probability();
    let pre_test_odds = pre_test_probability / (1.0 - pre_test_probability);

    let likelihood_ratio_product = LIKELIHOOD_RATIOS
        .iter()
        .filter_map(|lr| answers.get(lr.field).map(|answer| lr.ratio_for(answer)))
        .fold(1.0, |product, ratio| product * ratio);

    let post_test_odds = pre_test_odds * likelihood_ratio_product;
    let probability = post_test_odds / (1.0 + post_test_odds) * 100.0;

    Ok(FallProbabilityResult {
        post_test_probability_percent: round_to_tenth(probability),
        pre_test_probability,
        pre_test_odds,
        likelihood_ratio_product,
        post_test_odds,
    })
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
