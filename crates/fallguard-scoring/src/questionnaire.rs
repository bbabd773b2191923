//! Questionnaire structure: the ordered steps, the answer fields each step
//! owns, and the bilingual prompts shown for them.

use std::fmt;

use fallguard_core::models::answers::{AgeGroup, AnswerField};
use fallguard_core::models::locale::LocalizedText;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One screen of the assessment, in presentation order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Step {
    #[default]
    AgeGroup,
    InitialScreening,
    Severity,
    PhysicalTests,
    Results,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::AgeGroup,
        Step::InitialScreening,
        Step::Severity,
        Step::PhysicalTests,
        Step::Results,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::AgeGroup => "age_group",
            Step::InitialScreening => "initial_screening",
            Step::Severity => "severity",
            Step::PhysicalTests => "physical_tests",
            Step::Results => "results",
        }
    }

    /// The yes/no questions answered on this step. The age group step owns
    /// the `age_group` field instead, and the results step owns nothing.
    pub fn fields(&self) -> &'static [AnswerField] {
        const SEVERITY_AND_FRAILTY: [AnswerField; 5] = [
            AnswerField::GotInjuryFromFall,
            AnswerField::MultipleLastYear,
            AnswerField::UnableToGetUp,
            AnswerField::LostConsciousness,
            AnswerField::HasFrailty,
        ];

        match self {
            Step::AgeGroup | Step::Results => &[],
            Step::InitialScreening => &AnswerField::INITIAL_SCREENING,
            Step::Severity => &SEVERITY_AND_FRAILTY,
            Step::PhysicalTests => &AnswerField::PHYSICAL_TESTS,
        }
    }

    /// The step that owns `field`.
    pub fn of(field: AnswerField) -> Step {
        Step::ALL
            .into_iter()
            .find(|s| s.fields().contains(&field))
            .unwrap_or(Step::Results)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    pub field: AnswerField,
    pub prompt: LocalizedText,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StepDefinition {
    pub step: Step,
    pub title: LocalizedText,
    pub questions: Vec<Question>,
}

/// All steps of the assessment, in order.
pub fn questionnaire() -> &'static [StepDefinition] {
    static STEPS: std::sync::LazyLock<Vec<StepDefinition>> = std::sync::LazyLock::new(|| {
        let step = |step: Step, en: &str, zh_tw: &str| StepDefinition {
            step,
            title: LocalizedText::new(en, zh_tw),
            questions: step
                .fields()
                .iter()
                .map(|field| Question {
                    field: *field,
                    prompt: prompt(*field),
                })
                .collect(),
        };

        vec![
            step(Step::AgeGroup, "How old are you?", "請問您的年齡？"),
            step(
                Step::InitialScreening,
                "A few questions about the past year",
                "過去一年的狀況",
            ),
            step(Step::Severity, "About your falls", "關於您的跌倒經驗"),
            step(
                Step::PhysicalTests,
                "Simple balance and strength checks",
                "簡易平衡與肌力自我檢測",
            ),
            step(Step::Results, "Your results", "您的評估結果"),
        ]
    });
    &STEPS
}

pub fn step_definition(step: Step) -> &'static StepDefinition {
    &questionnaire()[step.index()]
}

pub fn prompt(field: AnswerField) -> LocalizedText {
    let (en, zh_tw) = match field {
        AnswerField::FallenLastYear => ("Have you fallen in the past year?", "過去一年內您是否曾經跌倒？"),
        AnswerField::TakingPsychoactiveMeds => (
            "Are you taking sleeping pills, sedatives, antidepressants or other medicines that affect the mind?",
            "您是否正在服用安眠藥、鎮定劑、抗憂鬱藥或其他影響精神狀態的藥物？",
        ),
        AnswerField::DifficultyWithAdl => (
            "Do you have difficulty with daily activities such as bathing, dressing or getting around the house?",
            "您在洗澡、穿衣或在家中走動等日常活動上是否有困難？",
        ),
        AnswerField::FearfulOfFalling => ("Are you worried about falling?", "您是否擔心自己會跌倒？"),
        AnswerField::UseAssistiveDevice => (
            "Do you use a cane, walker or other walking aid?",
            "您是否使用拐杖、助行器或其他行走輔具？",
        ),
        AnswerField::GotInjuryFromFall => ("Were you injured in a fall?", "您是否曾因跌倒而受傷？"),
        AnswerField::MultipleLastYear => (
            "Have you fallen more than once in the past year?",
            "過去一年內您是否跌倒超過一次？",
        ),
        AnswerField::UnableToGetUp => (
            "After a fall, were you unable to get up on your own?",
            "跌倒後您是否無法自行站起來？",
        ),
        AnswerField::LostConsciousness => (
            "Did you lose consciousness or faint when you fell?",
            "跌倒時您是否曾失去意識或昏倒？",
        ),
        AnswerField::HasFrailty => (
            "Have you noticed unintended weight loss, exhaustion, weakness or slower walking?",
            "您是否有非刻意的體重減輕、容易疲倦、肌力變弱或走路變慢的情形？",
        ),
        AnswerField::TandemStance22 => (
            "Can you stand with one foot directly in front of the other for 22 seconds?",
            "您能否以一腳在前、一腳在後的直線站姿站立 22 秒？",
        ),
        AnswerField::TandemStance30 => (
            "Can you hold that heel-to-toe stance for a full 30 seconds?",
            "您能否維持前後腳跟對腳尖的站姿達 30 秒？",
        ),
        AnswerField::TandemWalk => (
            "Can you walk heel-to-toe in a straight line for ten steps without stepping off?",
            "您能否腳跟接腳尖沿直線行走十步而不偏離？",
        ),
        AnswerField::SitToStand12 => (
            "Can you stand up from a chair five times, without using your arms, in under 12 seconds?",
            "您能否不用手支撐，在 12 秒內從椅子上起立坐下五次？",
        ),
        AnswerField::SitToStand30 => (
            "In 30 seconds, can you stand up from a chair at least 12 times without using your arms?",
            "在 30 秒內，您能否不用手支撐從椅子上起立至少 12 次？",
        ),
        AnswerField::SingleLimbStance => (
            "Can you stand on one leg for at least 5 seconds?",
            "您能否單腳站立至少 5 秒？",
        ),
    };
    LocalizedText::new(en, zh_tw)
}

pub fn age_group_label(age_group: AgeGroup) -> LocalizedText {
    match age_group {
        AgeGroup::Under60 => LocalizedText::new("Under 60", "60 歲以下"),
        AgeGroup::From60To69 => LocalizedText::new("60 to 69", "60 至 69 歲"),
        AgeGroup::From70To79 => LocalizedText::new("70 to 79", "70 至 79 歲"),
        AgeGroup::Over80 => LocalizedText::new("80 or older", "80 歲以上"),
    }
}

/// Shown when any severity or frailty answer is yes.
pub fn safety_notice() -> LocalizedText {
    LocalizedText::new(
        "Your answers suggest a higher chance of a serious fall. Only try the balance checks \
         on the next page with someone standing by, next to a sturdy chair or wall. \
         Skip any check that feels unsafe.",
        "您的回答顯示發生嚴重跌倒的風險較高。請在他人陪同下、並靠近穩固的椅子或牆壁，\
         再進行下一頁的平衡檢測；若感到不安全，請略過該項檢測。",
    )
}
