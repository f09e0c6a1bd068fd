use kiosque_core::models::answer::AnswerStore;

use crate::catalog::Catalog;
use crate::question::QuestionDefinition;

/// The questions that apply to `answers`, in catalog order.
///
/// Predicates are evaluated against the current full store, so a branch
/// opens or closes as soon as the answer it depends on changes.
pub fn compute_visible<'c>(catalog: &'c Catalog, answers: &AnswerStore) -> Vec<&'c QuestionDefinition> {
    catalog
        .questions()
        .iter()
        .filter(|question| question.is_visible(answers))
        .collect()
}

/// Index of the question owning `field` in a visible sequence.
pub fn position_of(visible: &[&QuestionDefinition], field: &str) -> Option<usize> {
    visible.iter().position(|question| question.field == field)
}

/// Bring `cursor` back into range after the visible sequence changed.
///
/// The cursor follows `anchor` (the question it pointed at) to its new
/// index. If that question is no longer visible the cursor is clamped to
/// the last visible question.
pub fn reposition(visible: &[&QuestionDefinition], cursor: usize, anchor: Option<&str>) -> usize {
    if let Some(index) = anchor.and_then(|field| position_of(visible, field)) {
        return index;
    }
    cursor.min(visible.len().saturating_sub(1))
}
