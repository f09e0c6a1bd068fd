use kiosque_core::models::submission::QuestionnaireResult;
use kiosque_core::models::triage::TriageResult;
use kiosque_questionnaire::{Coordinates, StepToken};
use kiosque_triage::error::TriageError;

use crate::location::LocationError;

/// Where the kiosk is in a consultation.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Asking,
    /// Waiting for the scoring service.
    Submitting(Box<QuestionnaireResult>),
    Report {
        submission: Box<QuestionnaireResult>,
        triage: Box<TriageResult>,
    },
    /// Scoring failed; the payload is kept for a resubmit.
    Failed(Box<QuestionnaireResult>),
}

/// Completions of background work, delivered to the event loop.
#[derive(Debug)]
pub enum Event {
    AutoAdvance(StepToken),
    Location(StepToken, Result<Coordinates, LocationError>),
    Triage(Result<TriageResult, TriageError>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}
