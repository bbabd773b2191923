//! Step controller for the assessment.
//!
//! [`FlowState`] is an immutable value; [`FlowState::apply`] returns the next
//! state for a user action or the reason the action is not allowed. The web
//! client keeps the current state and renders it.

use fallguard_core::models::answers::{AgeGroup, AnswerField, QuestionnaireAnswers};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::error::field_list;
use crate::questionnaire::Step;

/// Interstitial shown after the severity step when any answer there is yes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SafetyNotice {
    #[default]
    Hidden,
    /// Shown and waiting for the user to acknowledge it.
    Pending,
    Acknowledged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum FlowAction {
    SelectAgeGroup { age_group: AgeGroup },
    Answer { field: AnswerField, value: bool },
    Next,
    Back,
    AcknowledgeSafetyNotice,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("select an age group to continue")]
    AgeGroupRequired,

    #[error("{step} step is incomplete, unanswered: {}", field_list(.missing))]
    StepIncomplete {
        step: Step,
        missing: Vec<AnswerField>,
    },

    #[error("{question} is not asked on the {step} step")]
    NotOnStep { question: String, step: Step },

    #[error("the safety notice must be acknowledged first")]
    SafetyNoticePending,

    #[error("there is no safety notice to acknowledge")]
    NoSafetyNotice,

    #[error("already at the first step")]
    AtFirstStep,

    #[error("already at the last step")]
    AtLastStep,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FlowState {
    pub step: Step,
    pub answers: QuestionnaireAnswers,
    #[serde(default)]
    pub safety_notice: SafetyNotice,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action`. The state is first [reconciled](Self::reconciled),
    /// since it usually arrives from the client.
    pub fn apply(self, action: FlowAction) -> Result<FlowState, FlowError> {
        let this = self.reconciled();
        let from = this.step;
        let next = match action {
            FlowAction::SelectAgeGroup { age_group } => this.select_age_group(age_group),
            FlowAction::Answer { field, value } => this.answer(field, value),
            FlowAction::Next => this.next(),
            FlowAction::Back => this.back(),
            FlowAction::AcknowledgeSafetyNotice => this.acknowledge(),
            FlowAction::Restart => Ok(FlowState::default()),
        }?;

        if next.step != from {
            tracing::debug!(from = %from, to = %next.step, "assessment step changed");
        }
        Ok(next)
    }

    /// Bring a state that did not come from [`apply`](Self::apply) back in
    /// line with its answers.
    ///
    /// A state past the severity step with a yes there and no acknowledged
    /// notice is sent back to the severity step with the notice pending.
    /// Acknowledgement itself is taken on the client's word: the state is
    /// client-held and unsigned, so the notice is advisory. The scoring
    /// endpoint returns the notice text with every result that warrants it.
    pub fn reconciled(mut self) -> Self {
        let past_screening = self.step > Step::InitialScreening;
        if past_screening && self.severity_skipped() {
            for field in Step::Severity.fields() {
                self.answers.set(*field, None);
            }
        }

        let needs_notice = self.answers.any_true(Step::Severity.fields());
        if !needs_notice
            || (self.step < Step::Severity && self.safety_notice == SafetyNotice::Pending)
        {
            self.safety_notice = SafetyNotice::Hidden;
        } else if self.step > Step::Severity && self.safety_notice != SafetyNotice::Acknowledged {
            self.step = Step::Severity;
            self.safety_notice = SafetyNotice::Pending;
        }
        self
    }

    /// Whether forward navigation is enabled on the current step.
    pub fn can_advance(&self) -> bool {
        if self.safety_notice == SafetyNotice::Pending {
            return false;
        }
        match self.step {
            Step::AgeGroup => self.answers.age_group.is_some(),
            Step::Results => false,
            step => self.answers.missing(step.fields()).is_empty(),
        }
    }

    /// The severity step is skipped when every screening answer is no.
    pub fn severity_skipped(&self) -> bool {
        self.answers.all_false(Step::InitialScreening.fields())
    }

    fn select_age_group(mut self, age_group: AgeGroup) -> Result<FlowState, FlowError> {
        if self.step != Step::AgeGroup {
            return Err(FlowError::NotOnStep {
                question: "ageGroup".to_string(),
                step: self.step,
            });
        }
        self.answers.age_group = Some(age_group);
        Ok(self)
    }

    fn answer(mut self, field: AnswerField, value: bool) -> Result<FlowState, FlowError> {
        if self.safety_notice == SafetyNotice::Pending {
            return Err(FlowError::SafetyNoticePending);
        }
        if Step::of(field) != self.step {
            return Err(FlowError::NotOnStep {
                question: field.as_str().to_string(),
                step: self.step,
            });
        }

        if self.step == Step::Severity && self.answers.get(field) != Some(value) {
            self.safety_notice = SafetyNotice::Hidden;
        }
        self.answers.set(field, Some(value));
        Ok(self)
    }

    fn next(mut self) -> Result<FlowState, FlowError> {
        if self.safety_notice == SafetyNotice::Pending {
            return Err(FlowError::SafetyNoticePending);
        }

        match self.step {
            Step::AgeGroup => {
                if self.answers.age_group.is_none() {
                    return Err(FlowError::AgeGroupRequired);
                }
                self.step = Step::InitialScreening;
            }
            Step::InitialScreening => {
                self.require_complete()?;
                if self.severity_skipped() {
                    for field in Step::Severity.fields() {
                        self.answers.set(*field, None);
                    }
                    self.safety_notice = SafetyNotice::Hidden;
                    self.step = Step::PhysicalTests;
                } else {
                    self.step = Step::Severity;
                }
            }
            Step::Severity => {
                self.require_complete()?;
                let needs_notice = self.answers.any_true(Step::Severity.fields());
                if needs_notice && self.safety_notice != SafetyNotice::Acknowledged {
                    self.safety_notice = SafetyNotice::Pending;
                } else {
                    self.step = Step::PhysicalTests;
                }
            }
            Step::PhysicalTests => {
                self.require_complete()?;
                self.step = Step::Results;
            }
            Step::Results => return Err(FlowError::AtLastStep),
        }
        Ok(self)
    }

    fn back(mut self) -> Result<FlowState, FlowError> {
        // Backing out of the notice dismisses it without leaving the step.
        if self.safety_notice == SafetyNotice::Pending {
            self.safety_notice = SafetyNotice::Hidden;
            return Ok(self);
        }

        self.step = match self.step {
            Step::AgeGroup => return Err(FlowError::AtFirstStep),
            Step::InitialScreening => Step::AgeGroup,
            Step::Severity => Step::InitialScreening,
            Step::PhysicalTests if self.severity_skipped() => Step::InitialScreening,
            Step::PhysicalTests => Step::Severity,
            Step::Results => Step::PhysicalTests,
        };
        Ok(self)
    }

    fn acknowledge(mut self) -> Result<FlowState, FlowError> {
        if self.safety_notice != SafetyNotice::Pending {
            return Err(FlowError::NoSafetyNotice);
        }
        self.safety_notice = SafetyNotice::Acknowledged;
        self.step = Step::PhysicalTests;
        Ok(self)
    }

    fn require_complete(&self) -> Result<(), FlowError> {
        let missing = self.answers.missing(self.step.fields());
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FlowError::StepIncomplete {
                step: self.step,
                missing,
            })
        }
    }
}
