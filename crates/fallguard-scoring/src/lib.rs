//! fallguard-scoring
//!
//! Fall-risk scoring. Pure functions over the questionnaire answers, no I/O.
//! Holds the questionnaire structure, the risk classification rules, the
//! likelihood-ratio probability estimate, and the step controller that
//! guards how answers are collected.

pub mod classify;
pub mod error;
pub mod flow;
pub mod probability;
pub mod questionnaire;

use fallguard_core::models::answers::QuestionnaireAnswers;
use fallguard_core::models::risk::{FallProbabilityResult, RiskResult};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub use classify::classify_risk_level;
pub use error::ScoringError;
pub use probability::estimate_fall_probability;

/// Risk tier and fall probability for one completed questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub risk: RiskResult,
    pub probability: FallProbabilityResult,
}

/// Classify and estimate using the age group recorded in `answers`.
pub fn score(answers: &QuestionnaireAnswers) -> Result<Assessment, ScoringError> {
    let risk = classify_risk_level(answers)?;
    let probability = estimate_fall_probability(answers, answers.age_group)?;

    tracing::debug!(
        level = risk.level.as_str(),
        probability = probability.post_test_probability_percent,
        "assessment scored"
    );

    Ok(Assessment { risk, probability })
}
