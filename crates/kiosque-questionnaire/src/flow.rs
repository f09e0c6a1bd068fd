//! Stateful questionnaire session.
//!
//! [`Questionnaire`] owns the answer store and the step cursor and applies
//! every event in the same order: mutate the store, recompute the visible
//! sequence, then move the cursor. Deferred work (auto-advance timers,
//! device location requests) holds a [`StepToken`]; any later mutation or
//! navigation bumps the epoch and the token goes stale.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use kiosque_core::models::answer::{AnswerStore, AnswerValue};
use kiosque_core::models::session::SessionContext;
use kiosque_core::models::submission::QuestionnaireResult;

use crate::catalog::Catalog;
use crate::controller::{self, Advance};
use crate::emit::emit;
use crate::error::QuestionnaireError;
use crate::locations::{self, LocationNode};
use crate::question::{ChoiceOption, InputSource, QuestionDefinition, QuestionKind};
use crate::visibility::{compute_visible, reposition};

/// Snapshot of the flow a deferred action was scheduled against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepToken {
    cursor: usize,
    epoch: u64,
}

/// Coordinates reported by the host device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Result of recording an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recorded {
    pub token: StepToken,
    /// The caller should schedule [`Questionnaire::advance_from`] with `token`.
    pub auto_advance: bool,
}

/// What the flow shows after an advance.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Question(usize),
    Complete(Box<QuestionnaireResult>),
}

pub struct Questionnaire<'c> {
    catalog: &'c Catalog,
    tree: &'c [LocationNode],
    session: SessionContext,
    seed: AnswerStore,
    answers: AnswerStore,
    cursor: usize,
    epoch: u64,
    error: Option<String>,
    completed: bool,
}

impl<'c> Questionnaire<'c> {
    pub fn new(catalog: &'c Catalog, session: SessionContext, seed: AnswerStore) -> Self {
        Self {
            catalog,
            tree: locations::ivory_coast(),
            session,
            answers: seed.clone(),
            seed,
            cursor: 0,
            epoch: 0,
            error: None,
            completed: false,
        }
    }

    /// Use another location tree for dependent-choice questions.
    pub fn with_locations(mut self, tree: &'c [LocationNode]) -> Self {
        self.tree = tree;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn visible(&self) -> Vec<&'c QuestionDefinition> {
        compute_visible(self.catalog, &self.answers)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// The question to render, `None` once the flow completed.
    pub fn current(&self) -> Option<&'c QuestionDefinition> {
        if self.completed {
            return None;
        }
        self.visible().get(self.cursor).copied()
    }

    /// One-based step number and visible total, for the progress header.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.visible().len();
        (self.cursor.min(total.saturating_sub(1)) + 1, total)
    }

    /// Inline message under the current question, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn token(&self) -> StepToken {
        StepToken {
            cursor: self.cursor,
            epoch: self.epoch,
        }
    }

    pub fn is_fresh(&self, token: StepToken) -> bool {
        !self.completed && token == self.token()
    }

    /// Options offered for the current question. Dependent choices are
    /// resolved from the location tree using the parent answers.
    pub fn options(&self) -> Result<Vec<ChoiceOption>, QuestionnaireError> {
        let question = self.current().ok_or(QuestionnaireError::Completed)?;
        match question.kind {
            QuestionKind::DependentChoice => {
                locations::dependent_options(self.catalog, self.tree, question, &self.answers)
            }
            _ => Ok(question.options.clone()),
        }
    }

    /// Record an answer for a field of the current question.
    ///
    /// Clears the inline message, recomputes visibility, and repositions
    /// the cursor before returning.
    pub fn record(
        &mut self,
        field: &str,
        value: impl Into<AnswerValue>,
        source: InputSource,
    ) -> Result<Recorded, QuestionnaireError> {
        let question = self.current().ok_or(QuestionnaireError::Completed)?;
        if !question.owns(field) {
            return Err(QuestionnaireError::NotCurrentField {
                field: field.to_string(),
                current: question.field.clone(),
            });
        }

        let value = value.into();
        if question.kind == QuestionKind::DependentChoice
            && let Err(e) = self.check_dependent_choice(question, &value)
        {
            self.error = Some(e.to_string());
            return Err(e);
        }

        debug!(field, "answer recorded");
        let previous = self.answers.set(field, value);
        if previous.is_some() && previous.as_ref() != self.answers.get(field) {
            self.drop_dependents(field);
        }
        self.error = None;
        self.reanchor(Some(&question.field));
        self.epoch += 1;

        Ok(Recorded {
            token: self.token(),
            auto_advance: question.advances_on(source),
        })
    }

    /// Validate the current answer and move forward, or complete the flow.
    ///
    /// A rejection is kept as the inline message and returned.
    pub fn advance(&mut self) -> Result<Step, QuestionnaireError> {
        if self.completed {
            return Err(QuestionnaireError::Completed);
        }

        if let Some(question) = self.current()
            && question.kind == QuestionKind::DependentChoice
            && let Some(value) = self.answers.get(&question.field)
            && let Err(e) = self.check_dependent_choice(question, value)
        {
            self.error = Some(e.to_string());
            return Err(e);
        }

        let outcome = controller::advance(self.catalog, &mut self.answers, self.cursor);
        self.epoch += 1;
        match outcome {
            Ok(Advance::Moved(next)) => {
                self.cursor = next;
                self.error = None;
                Ok(Step::Question(next))
            }
            Ok(Advance::Complete) => {
                self.completed = true;
                self.error = None;
                let result = emit(
                    self.catalog,
                    &self.answers,
                    &self.session,
                    Uuid::new_v4(),
                    jiff::Timestamp::now(),
                );
                info!(
                    consultation_id = %result.consultation_id,
                    answers = result.answers.len(),
                    "questionnaire completed"
                );
                Ok(Step::Complete(Box::new(result)))
            }
            Err(QuestionnaireError::Rejected(rejection)) => {
                self.error = Some(rejection.to_string());
                Err(QuestionnaireError::Rejected(rejection))
            }
            Err(e) => Err(e),
        }
    }

    /// Run a deferred advance if nothing changed since `token` was issued.
    /// Returns `Ok(None)` for a stale token.
    pub fn advance_from(&mut self, token: StepToken) -> Result<Option<Step>, QuestionnaireError> {
        if !self.is_fresh(token) {
            debug!(?token, current = ?self.token(), "discarding stale advance");
            return Ok(None);
        }
        self.advance().map(Some)
    }

    /// Step back one question without validating.
    ///
    /// From the completed state this reopens the last visible question so
    /// answers can be corrected after a failed submission.
    pub fn retreat(&mut self) {
        if self.completed {
            self.completed = false;
        } else {
            self.cursor = controller::retreat(self.cursor);
        }
        self.error = None;
        self.epoch += 1;
    }

    /// Start a device-location capture on the current question.
    pub fn begin_location(&self) -> Result<StepToken, QuestionnaireError> {
        let question = self.current().ok_or(QuestionnaireError::Completed)?;
        if question.kind != QuestionKind::DeviceLocation {
            return Err(QuestionnaireError::NotLocationQuestion(question.field.clone()));
        }
        Ok(self.token())
    }

    /// Write captured coordinates and advance exactly once.
    ///
    /// A late reply for a question the user already left is dropped
    /// without touching the store.
    pub fn complete_location(
        &mut self,
        token: StepToken,
        coordinates: Coordinates,
    ) -> Result<Option<Step>, QuestionnaireError> {
        if !self.is_fresh(token) {
            debug!(?token, "discarding late location reply");
            return Ok(None);
        }
        let question = self.current().ok_or(QuestionnaireError::Completed)?;
        let Some(longitude_field) = question.longitude_field.as_deref() else {
            return Err(QuestionnaireError::NotLocationQuestion(question.field.clone()));
        };

        self.answers.set(question.field.as_str(), coordinates.latitude);
        self.answers.set(longitude_field, coordinates.longitude);
        self.error = None;
        self.reanchor(Some(&question.field));
        self.epoch += 1;

        let token = self.token();
        self.advance_from(token)
    }

    /// Record a failed capture: nothing is written and the cursor stays.
    /// Returns false when the failure belongs to a stale request.
    pub fn fail_location(&mut self, token: StepToken, message: impl Into<String>) -> bool {
        if !self.is_fresh(token) {
            return false;
        }
        self.error = Some(message.into());
        true
    }

    /// Start a new consultation under the same session.
    ///
    /// Every answer from the previous patient is dropped, seeded defaults
    /// are restored.
    pub fn restart(&mut self) {
        self.answers = self.seed.clone();
        self.cursor = 0;
        self.completed = false;
        self.error = None;
        self.epoch += 1;
        info!(nurse = %self.session.nurse_name, "questionnaire restarted");
    }

    fn check_dependent_choice(
        &self,
        question: &QuestionDefinition,
        value: &AnswerValue,
    ) -> Result<(), QuestionnaireError> {
        let options = locations::dependent_options(self.catalog, self.tree, question, &self.answers)?;
        if options.iter().any(|option| &option.value == value) {
            return Ok(());
        }
        Err(QuestionnaireError::UnknownOption {
            field: question.field.clone(),
            value: match value {
                AnswerValue::Text(text) => text.clone(),
                other => format!("{other:?}"),
            },
        })
    }

    /// A changed parent invalidates every location level below it.
    fn drop_dependents(&mut self, field: &str) {
        for dependent in self.catalog.dependents_of(field) {
            if self.answers.remove(&dependent.field).is_some() {
                debug!(field = %dependent.field, parent = field, "cleared stale dependent answer");
            }
        }
    }

    fn reanchor(&mut self, anchor: Option<&str>) {
        let visible = self.visible();
        self.cursor = reposition(&visible, self.cursor, anchor);
    }
}
