//! Response format of the scoring backend.

use serde::Deserialize;

use kiosque_core::models::triage::{Explanation, RiskLevel, TriageResult};

use crate::error::TriageError;

#[derive(Debug, Deserialize)]
pub struct EvaluateResponse {
    pub ml_scores: MlScores,
    pub risk_level: String,
    #[serde(default)]
    pub clinical_guidelines: ClinicalGuidelines,
    #[serde(default)]
    pub explanations: Vec<Explanation>,
}

#[derive(Debug, Deserialize)]
pub struct MlScores {
    pub gravite_oms: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClinicalGuidelines {
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub orientation: String,
}

/// Translate a backend response. An unrecognised risk label is an error;
/// the kiosk never guesses a band.
pub fn map_response(response: EvaluateResponse) -> Result<TriageResult, TriageError> {
    let risk_level = RiskLevel::from_label(&response.risk_level)?;
    Ok(TriageResult {
        score: response.ml_scores.gravite_oms,
        risk_level,
        risk_color: risk_level.color().to_string(),
        recommendations: response.clinical_guidelines.recommendations,
        orientation: response.clinical_guidelines.orientation,
        explanations: response.explanations,
    })
}

/// Decode and map a raw response body.
pub fn parse_response(body: &str) -> Result<TriageResult, TriageError> {
    let response: EvaluateResponse = serde_json::from_str(body)?;
    map_response(response)
}
