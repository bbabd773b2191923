use fallguard_core::models::answers::AnswerField;
use thiserror::Error;

use crate::questionnaire::Step;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("age group is required before estimating fall probability")]
    MissingPrior,

    #[error("{step} step is incomplete, unanswered: {}", field_list(.missing))]
    IncompleteAnswers {
        step: Step,
        missing: Vec<AnswerField>,
    },
}

pub(crate) fn field_list(fields: &[AnswerField]) -> String {
    fields
        .iter()
        .map(AnswerField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
