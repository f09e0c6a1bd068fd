use thiserror::Error;

use kiosque_core::error::CoreError;

#[derive(Debug, Error)]
pub enum TriageError {
    #[error("triage service unreachable: {0}")]
    Transport(String),

    #[error("triage service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to encode submission: {0}")]
    Encode(String),

    #[error("unreadable triage response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ureq::Error> for TriageError {
    fn from(e: ureq::Error) -> Self {
        TriageError::Transport(e.to_string())
    }
}
