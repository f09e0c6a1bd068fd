use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::answer::AnswerValue;

/// Channel tag stamped on every kiosk submission.
pub const SOURCE_TYPE: &str = "kiosque";

/// Review state of a submitted record on the data platform side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataQualityStatus {
    #[serde(rename = "en revue")]
    EnRevue,
    #[serde(rename = "validé")]
    Valide,
    #[serde(rename = "rejeté")]
    Rejete,
}

/// The completed questionnaire as posted to the scoring service.
///
/// Answers are flattened into the top-level JSON object next to the
/// session metadata, matching the backend's intake schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireResult {
    #[serde(flatten)]
    pub answers: BTreeMap<String, AnswerValue>,

    pub robot_id: String,
    pub health_center: String,
    pub nurse_name: String,
    pub source_type: String,
    pub data_quality_status: DataQualityStatus,
    pub consultation_id: Uuid,
    pub timestamp: jiff::Timestamp,
}

impl QuestionnaireResult {
    pub fn answer(&self, field: &str) -> Option<&AnswerValue> {
        self.answers.get(field)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.answer(field).and_then(AnswerValue::as_number)
    }

    pub fn flag(&self, field: &str) -> bool {
        self.answer(field)
            .and_then(AnswerValue::as_bool)
            .unwrap_or(false)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.answer(field).and_then(AnswerValue::as_str)
    }

    /// Short uppercase reference printed on reports, e.g. `3F9A1C`.
    pub fn short_reference(&self) -> String {
        self.consultation_id.simple().to_string()[..6].to_uppercase()
    }
}
