use kiosque_core::models::answer::AnswerStore;

use crate::catalog::Catalog;
use crate::error::QuestionnaireError;
use crate::question::{QuestionDefinition, QuestionKind};
use crate::validate::validate;
use crate::visibility::{compute_visible, position_of};

/// Outcome of a successful advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved to this index of the new visible sequence.
    Moved(usize),
    /// The last visible question was answered; emit the result.
    Complete,
}

/// Validate the question under `cursor`, commit it, and move forward.
///
/// On rejection the store and cursor are left as they were. The next index
/// is taken from the sequence recomputed after the commit, so a branch
/// opened by the answer just given is entered immediately.
pub fn advance(catalog: &Catalog, answers: &mut AnswerStore, cursor: usize) -> Result<Advance, QuestionnaireError> {
    let visible = compute_visible(catalog, answers);
    let question = *visible
        .get(cursor)
        .ok_or(QuestionnaireError::CursorOutOfRange {
            cursor,
            len: visible.len(),
        })?;

    validate(question, answers.get(&question.field))?;
    commit(question, answers);

    let visible = compute_visible(catalog, answers);
    let here = position_of(&visible, &question.field).unwrap_or(cursor);
    if here + 1 < visible.len() {
        Ok(Advance::Moved(here + 1))
    } else {
        Ok(Advance::Complete)
    }
}

/// Step back one question. Never validates and never touches answers.
pub fn retreat(cursor: usize) -> usize {
    cursor.saturating_sub(1)
}

/// Make a validated answer explicit in the store: unticked boxes of a
/// multi-checkbox question are recorded as `false`.
fn commit(question: &QuestionDefinition, answers: &mut AnswerStore) {
    if question.kind != QuestionKind::MultiCheckbox {
        return;
    }
    for checkbox in &question.checkboxes {
        if !answers.contains(&checkbox.field) {
            answers.set(checkbox.field.as_str(), false);
        }
    }
}
