use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Risk band returned by the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Faible,
    #[serde(rename = "Modéré")]
    Modere,
    #[serde(rename = "Élevé")]
    Eleve,
    #[serde(rename = "Très Élevé")]
    TresEleve,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Faible => "Faible",
            RiskLevel::Modere => "Modéré",
            RiskLevel::Eleve => "Élevé",
            RiskLevel::TresEleve => "Très Élevé",
        }
    }

    /// Display color used by the kiosk screens.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Faible => "#34C759",
            RiskLevel::Modere => "#FFC107",
            RiskLevel::Eleve | RiskLevel::TresEleve => "#FF3B30",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, CoreError> {
        match label.trim() {
            "Faible" => Ok(RiskLevel::Faible),
            "Modéré" => Ok(RiskLevel::Modere),
            "Élevé" => Ok(RiskLevel::Eleve),
            "Très Élevé" => Ok(RiskLevel::TresEleve),
            other => Err(CoreError::UnknownRiskLevel(other.to_string())),
        }
    }
}

/// One feature attribution from the model's explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Explanation {
    pub feature: String,
    pub value: serde_json::Value,
    pub importance: f64,
}

/// Scored triage outcome for one consultation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TriageResult {
    /// Severity score, 0–100.
    pub score: f64,
    pub risk_level: RiskLevel,
    pub risk_color: String,
    pub recommendations: Vec<String>,
    pub orientation: String,
    pub explanations: Vec<Explanation>,
}
