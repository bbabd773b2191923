use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Age bracket selected on the first questionnaire step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AgeGroup {
    #[serde(rename = "under60")]
    Under60,
    #[serde(rename = "60to69")]
    From60To69,
    #[serde(rename = "70to79")]
    From70To79,
    #[serde(rename = "80plus")]
    Over80,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Under60,
        AgeGroup::From60To69,
        AgeGroup::From70To79,
        AgeGroup::Over80,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Under60 => "under60",
            AgeGroup::From60To69 => "60to69",
            AgeGroup::From70To79 => "70to79",
            AgeGroup::Over80 => "80plus",
        }
    }

    /// Probability of falling in the next 12 months before any individual
    /// risk factor is considered.
    pub fn pre_test_probability(&self) -> f64 {
        match self {
            AgeGroup::Under60 => 0.20,
            AgeGroup::From60To69 => 0.30,
            AgeGroup::From70To79 => 0.40,
            AgeGroup::Over80 => 0.50,
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeGroup {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| CoreError::UnknownAgeGroup(s.to_string()))
    }
}

/// Every yes/no question in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum AnswerField {
    FallenLastYear,
    TakingPsychoactiveMeds,
    #[serde(rename = "difficultyWithADL")]
    DifficultyWithAdl,
    FearfulOfFalling,
    UseAssistiveDevice,
    GotInjuryFromFall,
    MultipleLastYear,
    UnableToGetUp,
    LostConsciousness,
    HasFrailty,
    TandemStance22,
    TandemStance30,
    TandemWalk,
    SitToStand12,
    SitToStand30,
    SingleLimbStance,
}

impl AnswerField {
    /// Initial screening questions. All `false` means low risk.
    pub const INITIAL_SCREENING: [AnswerField; 5] = [
        AnswerField::FallenLastYear,
        AnswerField::TakingPsychoactiveMeds,
        AnswerField::DifficultyWithAdl,
        AnswerField::FearfulOfFalling,
        AnswerField::UseAssistiveDevice,
    ];

    /// Fall severity questions. Any `true` escalates to high risk.
    pub const SEVERITY: [AnswerField; 4] = [
        AnswerField::GotInjuryFromFall,
        AnswerField::MultipleLastYear,
        AnswerField::UnableToGetUp,
        AnswerField::LostConsciousness,
    ];

    /// Self-reported physical tests. `true` means the test was passed.
    pub const PHYSICAL_TESTS: [AnswerField; 6] = [
        AnswerField::TandemStance22,
        AnswerField::TandemStance30,
        AnswerField::TandemWalk,
        AnswerField::SitToStand12,
        AnswerField::SitToStand30,
        AnswerField::SingleLimbStance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerField::FallenLastYear => "fallenLastYear",
            AnswerField::TakingPsychoactiveMeds => "takingPsychoactiveMeds",
            AnswerField::DifficultyWithAdl => "difficultyWithADL",
            AnswerField::FearfulOfFalling => "fearfulOfFalling",
            AnswerField::UseAssistiveDevice => "useAssistiveDevice",
            AnswerField::GotInjuryFromFall => "gotInjuryFromFall",
            AnswerField::MultipleLastYear => "multipleLastYear",
            AnswerField::UnableToGetUp => "unableToGetUp",
            AnswerField::LostConsciousness => "lostConsciousness",
            AnswerField::HasFrailty => "hasFrailty",
            AnswerField::TandemStance22 => "tandemStance22",
            AnswerField::TandemStance30 => "tandemStance30",
            AnswerField::TandemWalk => "tandemWalk",
            AnswerField::SitToStand12 => "sitToStand12",
            AnswerField::SitToStand30 => "sitToStand30",
            AnswerField::SingleLimbStance => "singleLimbStance",
        }
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Answers collected by the assessment, one field per question.
///
/// `None` means the question has not been answered yet. The record starts
/// empty, is filled in one answer at a time, and is read once at scoring time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct QuestionnaireAnswers {
    pub age_group: Option<AgeGroup>,

    // Initial screening
    pub fallen_last_year: Option<bool>,
    pub taking_psychoactive_meds: Option<bool>,
    #[serde(rename = "difficultyWithADL")]
    pub difficulty_with_adl: Option<bool>,
    pub fearful_of_falling: Option<bool>,
    pub use_assistive_device: Option<bool>,

    // Severity and frailty
    pub got_injury_from_fall: Option<bool>,
    pub multiple_last_year: Option<bool>,
    pub unable_to_get_up: Option<bool>,
    pub lost_consciousness: Option<bool>,
    pub has_frailty: Option<bool>,

    // Physical self-report tests
    #[serde(rename = "tandemStance22")]
    pub tandem_stance_22: Option<bool>,
    #[serde(rename = "tandemStance30")]
    pub tandem_stance_30: Option<bool>,
    pub tandem_walk: Option<bool>,
    #[serde(rename = "sitToStand12")]
    pub sit_to_stand_12: Option<bool>,
    #[serde(rename = "sitToStand30")]
    pub sit_to_stand_30: Option<bool>,
    pub single_limb_stance: Option<bool>,
}

impl QuestionnaireAnswers {
    pub fn get(&self, field: AnswerField) -> Option<bool> {
        match field {
            AnswerField::FallenLastYear => self.fallen_last_year,
            AnswerField::TakingPsychoactiveMeds => self.taking_psychoactive_meds,
            AnswerField::DifficultyWithAdl => self.difficulty_with_adl,
            AnswerField::FearfulOfFalling => self.fearful_of_falling,
            AnswerField::UseAssistiveDevice => self.use_assistive_device,
            AnswerField::GotInjuryFromFall => self.got_injury_from_fall,
            AnswerField::MultipleLastYear => self.multiple_last_year,
            AnswerField::UnableToGetUp => self.unable_to_get_up,
            AnswerField::LostConsciousness => self.lost_consciousness,
            AnswerField::HasFrailty => self.has_frailty,
            AnswerField::TandemStance22 => self.tandem_stance_22,
            AnswerField::TandemStance30 => self.tandem_stance_30,
            AnswerField::TandemWalk => self.tandem_walk,
            AnswerField::SitToStand12 => self.sit_to_stand_12,
            AnswerField::SitToStand30 => self.sit_to_stand_30,
            AnswerField::SingleLimbStance => self.single_limb_stance,
        }
    }

    pub fn set(&mut self, field: AnswerField, value: Option<bool>) {
        let slot = match field {
            AnswerField::FallenLastYear => &mut self.fallen_last_year,
            AnswerField::TakingPsychoactiveMeds => &mut self.taking_psychoactive_meds,
            AnswerField::DifficultyWithAdl => &mut self.difficulty_with_adl,
            AnswerField::FearfulOfFalling => &mut self.fearful_of_falling,
            AnswerField::UseAssistiveDevice => &mut self.use_assistive_device,
            AnswerField::GotInjuryFromFall => &mut self.got_injury_from_fall,
            AnswerField::MultipleLastYear => &mut self.multiple_last_year,
            AnswerField::UnableToGetUp => &mut self.unable_to_get_up,
            AnswerField::LostConsciousness => &mut self.lost_consciousness,
            AnswerField::HasFrailty => &mut self.has_frailty,
            AnswerField::TandemStance22 => &mut self.tandem_stance_22,
            AnswerField::TandemStance30 => &mut self.tandem_stance_30,
            AnswerField::TandemWalk => &mut self.tandem_walk,
            AnswerField::SitToStand12 => &mut self.sit_to_stand_12,
            AnswerField::SitToStand30 => &mut self.sit_to_stand_30,
            AnswerField::SingleLimbStance => &mut self.single_limb_stance,
        };
        *slot = value;
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, field: AnswerField, value: bool) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Fields from `fields` that are still unanswered, in order.
    pub fn missing(&self, fields: &[AnswerField]) -> Vec<AnswerField> {
        fields
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    pub fn any_true(&self, fields: &[AnswerField]) -> bool {
        fields.iter().any(|f| self.get(*f) == Some(true))
    }

    pub fn all_false(&self, fields: &[AnswerField]) -> bool {
        fields.iter().all(|f| self.get(*f) == Some(false))
    }
}
