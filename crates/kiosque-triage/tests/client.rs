use std::collections::BTreeMap;
use std::time::Duration;

use kiosque_core::models::answer::AnswerValue;
use kiosque_core::models::submission::{DataQualityStatus, QuestionnaireResult, SOURCE_TYPE};
use kiosque_triage::error::TriageError;
use kiosque_triage::{FAILURE_ALERT, Scorer, TriageClient};

fn submission() -> QuestionnaireResult {
    let mut answers = BTreeMap::new();
    answers.insert("temperature_c".to_string(), AnswerValue::Number(38.5));
    QuestionnaireResult {
        answers,
        robot_id: "KIOSK-CI-001".to_string(),
        health_center: "CSU Cocody".to_string(),
        nurse_name: "Awa Koné".to_string(),
        source_type: SOURCE_TYPE.to_string(),
        data_quality_status: DataQualityStatus::EnRevue,
        consultation_id: uuid::Uuid::new_v4(),
        timestamp: jiff::Timestamp::UNIX_EPOCH,
    }
}

#[test]
fn client_targets_the_evaluate_route() {
    let client = TriageClient::new("https://backend-kiosque.onrender.com", Duration::from_secs(5));
    assert_eq!(
        client.endpoint(),
        "https://backend-kiosque.onrender.com/triage/evaluate"
    );
}

#[test]
fn unreachable_service_is_a_transport_error() {
    // nothing listens on the discard port in test environments
    let client = TriageClient::new("http://127.0.0.1:9", Duration::from_secs(2));
    let err = client.evaluate(&submission()).unwrap_err();
    assert!(matches!(err, TriageError::Transport(_)));
}

#[test]
fn operator_alert_is_in_french() {
    assert!(FAILURE_ALERT.starts_with("Une erreur est survenue"));
}
