use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::locale::Locale;

/// Fall-risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Intermediate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Intermediate => "INTERMEDIATE",
            RiskLevel::High => "HIGH",
        }
    }
}

/// The advice attached to a risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Recommendation {
    /// Frailty present: referral plus supervised activity.
    ProfessionalAssessmentSupervised,
    /// Serious fall history: referral.
    ProfessionalAssessment,
    MaintainRegimen,
    ExerciseAndMonitor,
}

impl Recommendation {
    pub fn text(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Recommendation::ProfessionalAssessmentSupervised, Locale::En) => {
                "We strongly advise a professional multifactorial fall risk assessment. \
                 Please make sure all physical activity is supervised."
            }
            (Recommendation::ProfessionalAssessmentSupervised, Locale::ZhTw) => {
                "強烈建議您接受專業的多因子跌倒風險評估，所有身體活動請務必在他人陪同下進行。"
            }
            (Recommendation::ProfessionalAssessment, Locale::En) => {
                "We strongly advise a professional multifactorial fall risk assessment."
            }
            (Recommendation::ProfessionalAssessment, Locale::ZhTw) => {
                "強烈建議您接受專業的多因子跌倒風險評估。"
            }
            (Recommendation::MaintainRegimen, Locale::En) => {
                "Your fall risk is low. Keep up your current activity and exercise routine."
            }
            (Recommendation::MaintainRegimen, Locale::ZhTw) => {
                "您的跌倒風險較低，請維持目前的活動與運動習慣。"
            }
            (Recommendation::ExerciseAndMonitor, Locale::En) => {
                "Start a regular strength and balance exercise program and keep track of any \
                 changes in your balance or walking."
            }
            (Recommendation::ExerciseAndMonitor, Locale::ZhTw) => {
                "建議開始規律的肌力與平衡訓練，並持續留意平衡與行走能力的變化。"
            }
        }
    }
}

/// Output of risk classification. Recomputed on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RiskResult {
    pub level: RiskLevel,
    pub recommendation: Recommendation,
}

impl RiskResult {
    pub fn recommendation_text(&self, locale: Locale) -> &'static str {
        self.recommendation.text(locale)
    }
}

/// Output of the likelihood-ratio estimate of a fall in the next 12 months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FallProbabilityResult {
    /// Rounded to one decimal place.
    pub post_test_probability_percent: f64,
    pub pre_test_probability: f64,
    pub pre_test_odds: f64,
    pub likelihood_ratio_product: f64,
    pub post_test_odds: f64,
}
