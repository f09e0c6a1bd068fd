//! Data shown on the consultation report.

use serde::Serialize;

use kiosque_core::fields;
use kiosque_core::models::submission::QuestionnaireResult;
use kiosque_core::models::triage::TriageResult;
use kiosque_questionnaire::locations::{self, LocationNode};

use crate::theme::{ReportTheme, theme_for};

/// Symptoms listed on the report, in display order.
const REPORTED_SYMPTOMS: [(&str, &str); 8] = [
    (fields::FIEVRE, "Fièvre"),
    (fields::CEPHALEES, "Céphalées"),
    (fields::CONVULSIONS, "Convulsions"),
    (fields::NAUSEES_VOMISSEMENTS, "Vomissements"),
    (fields::FATIGUE, "Fatigue"),
    (fields::FRISSONS, "Frissons"),
    (fields::DOULEURS_ARTICULAIRES, "Douleurs Art."),
    (fields::DIARHEE, "Diarrhée"),
];

const PROTOCOL: &str = "PNLP V3.0";
const MISSING: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientCard {
    pub age: String,
    pub sex: String,
    pub weight: String,
    pub place: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vitals {
    pub temperature: String,
    pub spo2: String,
    pub pulse: String,
    pub blood_pressure: String,
}

/// Everything the report templates read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportContext {
    pub reference: String,
    pub consultation_id: String,
    pub generated_at: String,
    pub patient: PatientCard,
    pub vitals: Vitals,
    pub symptoms: Vec<String>,
    pub score: String,
    pub risk_label: String,
    pub theme: ReportTheme,
    pub orientation: String,
    pub recommendations: Vec<String>,
    pub highlight: Option<String>,
    pub footer: String,
}

impl ReportContext {
    pub fn new(submission: &QuestionnaireResult, triage: &TriageResult) -> Self {
        Self::with_locations(submission, triage, locations::ivory_coast())
    }

    /// Build the context resolving location codes against `tree`.
    pub fn with_locations(
        submission: &QuestionnaireResult,
        triage: &TriageResult,
        tree: &[LocationNode],
    ) -> Self {
        let risk_label = triage.risk_level.label().to_string();
        Self {
            reference: submission.short_reference(),
            consultation_id: submission.consultation_id.to_string(),
            generated_at: submission.timestamp.strftime("%Y-%m-%d %H:%M UTC").to_string(),
            patient: patient_card(submission, tree),
            vitals: vitals(submission),
            symptoms: active_symptoms(submission),
            score: format_number(triage.score),
            theme: theme_for(&risk_label),
            risk_label,
            orientation: triage.orientation.clone(),
            recommendations: triage.recommendations.clone(),
            highlight: triage.explanations.first().map(|e| match &e.value {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            }),
            footer: format!(
                "Agent : {} • {} • {PROTOCOL}",
                submission.nurse_name, submission.health_center
            ),
        }
    }
}

/// Labels of the reported symptoms whose box was ticked.
pub fn active_symptoms(submission: &QuestionnaireResult) -> Vec<String> {
    REPORTED_SYMPTOMS
        .iter()
        .filter(|(field, _)| submission.flag(field))
        .map(|(_, label)| label.to_string())
        .collect()
}

fn patient_card(submission: &QuestionnaireResult, tree: &[LocationNode]) -> PatientCard {
    let age = match submission.number(fields::AGE_YEARS) {
        Some(years) => match submission.number(fields::AGE_MONTHS) {
            Some(months) if months > 0.0 => {
                format!("{} ans {}m", format_number(years), format_number(months))
            }
            _ => format!("{} ans", format_number(years)),
        },
        None => MISSING.to_string(),
    };

    let sex = match submission.text(fields::GENDER) {
        Some("M") => "Masculin",
        Some(_) => "Féminin",
        None => MISSING,
    };

    let place = submission
        .text(fields::DISTRICT)
        .map(|code| locations::label_for(tree, code).unwrap_or(code).to_string())
        .unwrap_or_else(|| MISSING.to_string());

    PatientCard {
        age,
        sex: sex.to_string(),
        weight: with_unit(submission.number(fields::POIDS), " kg"),
        place,
    }
}

fn vitals(submission: &QuestionnaireResult) -> Vitals {
    let blood_pressure = match (
        submission.number(fields::PA_SYSTOLIQUE),
        submission.number(fields::PA_DIASTOLIQUE),
    ) {
        (Some(sys), Some(dia)) => format!("{}/{}", format_number(sys), format_number(dia)),
        _ => MISSING.to_string(),
    };

    Vitals {
        temperature: with_unit(submission.number(fields::TEMPERATURE_C), "°C"),
        spo2: with_unit(submission.number(fields::SPO2_PCT), "%"),
        pulse: with_unit(submission.number(fields::FC_BPM), " bpm"),
        blood_pressure,
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{}{unit}", format_number(v)))
        .unwrap_or_else(|| MISSING.to_string())
}

/// Integers without a trailing `.0`, one decimal otherwise.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
