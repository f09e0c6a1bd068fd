use std::collections::BTreeSet;

use uuid::Uuid;

use kiosque_core::fields::meta;
use kiosque_core::models::answer::AnswerStore;
use kiosque_core::models::session::SessionContext;
use kiosque_core::models::submission::{DataQualityStatus, QuestionnaireResult, SOURCE_TYPE};

use crate::catalog::Catalog;
use crate::visibility::compute_visible;

/// Package the answers for submission.
///
/// Answers owned by a question that is hidden at completion time are left
/// out; they only linger in the store so a reopened branch shows them
/// again. Keys no question owns (seeded defaults) pass through, except
/// the session metadata keys, which the result carries itself.
pub(crate) fn emit(
    catalog: &Catalog,
    answers: &AnswerStore,
    session: &SessionContext,
    consultation_id: Uuid,
    timestamp: jiff::Timestamp,
) -> QuestionnaireResult {
    let visible_fields: BTreeSet<&str> = compute_visible(catalog, answers)
        .into_iter()
        .flat_map(|q| q.owned_fields())
        .collect();

    let relevant = answers.filtered(|field| {
        visible_fields.contains(field)
            || (catalog.owner_of(field).is_none() && !meta::ALL.contains(&field))
    });

    QuestionnaireResult {
        answers: relevant.into_map(),
        robot_id: session.robot_id.clone(),
        health_center: session.health_center.clone(),
        nurse_name: session.nurse_name.clone(),
        source_type: SOURCE_TYPE.to_string(),
        data_quality_status: DataQualityStatus::EnRevue,
        consultation_id,
        timestamp,
    }
}
