use std::collections::BTreeMap;

use kiosque_core::fields;
use kiosque_core::models::answer::AnswerValue;
use kiosque_core::models::submission::{DataQualityStatus, QuestionnaireResult, SOURCE_TYPE};
use kiosque_core::models::triage::{Explanation, RiskLevel, TriageResult};
use kiosque_report::context::active_symptoms;
use kiosque_report::{ReportContext, ReportFormat, render_report, theme_for};

fn submission(answers: &[(&str, AnswerValue)]) -> QuestionnaireResult {
    let answers: BTreeMap<String, AnswerValue> = answers
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    QuestionnaireResult {
        answers,
        robot_id: "KIOSK-CI-001".to_string(),
        health_center: "CSU Cocody".to_string(),
        nurse_name: "Awa Koné".to_string(),
        source_type: SOURCE_TYPE.to_string(),
        data_quality_status: DataQualityStatus::EnRevue,
        consultation_id: uuid::Uuid::nil(),
        timestamp: jiff::Timestamp::UNIX_EPOCH,
    }
}

fn child_with_fever() -> QuestionnaireResult {
    submission(&[
        (fields::AGE_YEARS, AnswerValue::from(3)),
        (fields::AGE_MONTHS, AnswerValue::from(4)),
        (fields::GENDER, AnswerValue::from("M")),
        (fields::POIDS, AnswerValue::from(14.5)),
        (fields::DISTRICT, AnswerValue::from("abidjan")),
        (fields::TEMPERATURE_C, AnswerValue::from(39.5)),
        (fields::SPO2_PCT, AnswerValue::from(94)),
        (fields::FC_BPM, AnswerValue::from(130)),
        (fields::PA_SYSTOLIQUE, AnswerValue::from(95)),
        (fields::PA_DIASTOLIQUE, AnswerValue::from(60)),
        (fields::FIEVRE, AnswerValue::from(true)),
        (fields::CEPHALEES, AnswerValue::from(false)),
        (fields::CONVULSIONS, AnswerValue::from(true)),
        (fields::TROUBLES_CONSCIENCE, AnswerValue::from(true)),
    ])
}

fn triage(level: RiskLevel) -> TriageResult {
    TriageResult {
        score: 72.0,
        risk_level: level,
        risk_color: level.color().to_string(),
        recommendations: vec![
            "Administrer artésunate".to_string(),
            "Référer en urgence".to_string(),
        ],
        orientation: "Transfert au CHR".to_string(),
        explanations: vec![Explanation {
            feature: fields::CONVULSIONS.to_string(),
            value: serde_json::json!("Convulsions : signe de gravité"),
            importance: 0.3,
        }],
    }
}

#[test]
fn only_ticked_report_symptoms_are_listed() {
    // troubles de la conscience is collected but not part of the report list
    assert_eq!(active_symptoms(&child_with_fever()), ["Fièvre", "Convulsions"]);
    assert!(active_symptoms(&submission(&[])).is_empty());
}

#[test]
fn theme_follows_the_risk_label() {
    assert_eq!(theme_for("Faible").hex, "#059669");
    assert_eq!(theme_for("Modéré").hex, "#f59e0b");
    assert_eq!(theme_for("Élevé").hex, "#dc2626");
    assert_eq!(theme_for("Très Élevé").name, "red");
    assert_eq!(theme_for("FAIBLE").name, "emerald");
}

#[test]
fn patient_card_and_vitals_are_formatted_for_display() {
    let report = ReportContext::new(&child_with_fever(), &triage(RiskLevel::Eleve));

    assert_eq!(report.patient.age, "3 ans 4m");
    assert_eq!(report.patient.sex, "Masculin");
    assert_eq!(report.patient.weight, "14.5 kg");
    assert_eq!(report.patient.place, "District Autonome d'Abidjan");
    assert_eq!(report.vitals.temperature, "39.5°C");
    assert_eq!(report.vitals.spo2, "94%");
    assert_eq!(report.vitals.blood_pressure, "95/60");
    assert_eq!(report.reference, "000000");
    assert_eq!(report.footer, "Agent : Awa Koné • CSU Cocody • PNLP V3.0");
    assert_eq!(report.highlight.as_deref(), Some("Convulsions : signe de gravité"));
}

#[test]
fn missing_answers_render_as_a_dash() {
    let report = ReportContext::new(
        &submission(&[(fields::AGE_YEARS, AnswerValue::from(40))]),
        &triage(RiskLevel::Faible),
    );
    assert_eq!(report.patient.age, "40 ans");
    assert_eq!(report.patient.sex, "-");
    assert_eq!(report.vitals.blood_pressure, "-");
}

#[test]
fn text_report_shows_result_and_symptoms() {
    let report = ReportContext::new(&child_with_fever(), &triage(RiskLevel::Eleve));
    let text = render_report(&report, ReportFormat::Text).unwrap();

    assert!(text.contains("ID: 000000"));
    assert!(text.contains("Fièvre, Convulsions"));
    assert!(text.contains("RISQUE ÉLEVÉ"));
    assert!(text.contains("Transfert au CHR"));
    assert!(text.contains("- Référer en urgence"));
    assert!(text.contains("Agent : Awa Koné • CSU Cocody • PNLP V3.0"));
    assert!(!text.contains("Aucun symptôme majeur"));
}

#[test]
fn report_without_symptoms_says_so() {
    let report = ReportContext::new(&submission(&[]), &triage(RiskLevel::Faible));
    let text = render_report(&report, ReportFormat::Text).unwrap();
    assert!(text.contains("Aucun symptôme majeur"));
}

#[test]
fn rendering_is_deterministic() {
    let report = ReportContext::new(&child_with_fever(), &triage(RiskLevel::Modere));
    assert_eq!(
        render_report(&report, ReportFormat::Html).unwrap(),
        render_report(&report, ReportFormat::Html).unwrap()
    );
}

#[test]
fn html_report_uses_theme_and_escapes_content() {
    let mut result = triage(RiskLevel::Modere);
    result.orientation = "<script>alert(1)</script>".to_string();
    let report = ReportContext::new(&child_with_fever(), &result);
    let html = render_report(&report, ReportFormat::Html).unwrap();

    assert!(html.contains("theme-amber"));
    assert!(html.contains("#f59e0b"));
    assert!(!html.contains("<script>"));
}
