use thiserror::Error;

use crate::validate::Rejection;

#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("{0}")]
    Rejected(#[from] Rejection),

    #[error("questionnaire already completed")]
    Completed,

    #[error("no visible question at step {cursor} of {len}")]
    CursorOutOfRange { cursor: usize, len: usize },

    #[error("field '{field}' does not belong to the current question '{current}'")]
    NotCurrentField { field: String, current: String },

    #[error("question '{0}' is not a device-location question")]
    NotLocationQuestion(String),

    #[error("'{field}' cannot be answered before '{parent}'")]
    MissingParent { field: String, parent: String },

    #[error("'{value}' is not a valid option for '{field}'")]
    UnknownOption { field: String, value: String },

    #[error("duplicate field in catalog: {0}")]
    DuplicateField(String),

    #[error("question '{field}' depends on unknown field '{parent}'")]
    DanglingDependency { field: String, parent: String },

    #[error("invalid rule on '{field}': {reason}")]
    InvalidRule { field: String, reason: String },
}
