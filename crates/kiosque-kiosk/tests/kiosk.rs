use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::io::AsyncBufReadExt;

use kiosque_core::fields;
use kiosque_core::models::answer::AnswerStore;
use kiosque_core::models::session::SessionContext;
use kiosque_core::models::submission::QuestionnaireResult;
use kiosque_core::models::triage::{RiskLevel, TriageResult};
use kiosque_kiosk::config::KiosqueConfig;
use kiosque_kiosk::kiosk::{Kiosk, Timings};
use kiosque_kiosk::location::{FixedLocation, LocationProvider, NoLocation};
use kiosque_kiosk::login::login;
use kiosque_kiosk::screen::LOGIN_INCOMPLETE;
use kiosque_kiosk::state::{Event, Phase};
use kiosque_questionnaire::question::{ChoiceOption, QuestionDefinition, QuestionKind};
use kiosque_questionnaire::{Catalog, Coordinates, Questionnaire};
use kiosque_triage::error::TriageError;
use kiosque_triage::{FAILURE_ALERT, Scorer};

/// Scores every consultation as moderate, or fails the first `failures` calls.
struct FakeScorer {
    calls: AtomicUsize,
    failures: usize,
}

impl FakeScorer {
    fn new(failures: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            failures,
        })
    }
}

impl Scorer for FakeScorer {
    fn evaluate(&self, _submission: &QuestionnaireResult) -> Result<TriageResult, TriageError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(TriageError::Status {
                status: 503,
                body: "indisponible".to_string(),
            });
        }
        Ok(TriageResult {
            score: 45.0,
            risk_level: RiskLevel::Modere,
            risk_color: RiskLevel::Modere.color().to_string(),
            recommendations: vec!["Traitement ACT".to_string()],
            orientation: "Traitement ambulatoire".to_string(),
            explanations: Vec::new(),
        })
    }
}

fn session() -> SessionContext {
    SessionContext::new("Awa Koné", "CSU Cocody", "KIOSK-CI-001").unwrap()
}

fn timings() -> Timings {
    Timings {
        auto_advance: Duration::from_millis(10),
        location_timeout: Duration::from_millis(200),
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        QuestionDefinition::new(fields::AGE_YEARS, QuestionKind::Numeric, "Âge")
            .required()
            .bounds(0.0, 120.0),
        QuestionDefinition::new(fields::GENDER, QuestionKind::SingleChoice, "Sexe")
            .required()
            .options(vec![ChoiceOption::new("Masculin", "M"), ChoiceOption::new("Féminin", "F")]),
        QuestionDefinition::new(fields::TEMPERATURE_C, QuestionKind::Numeric, "Température")
            .required()
            .bounds(35.0, 42.0),
    ])
}

fn kiosk<'c>(
    catalog: &'c Catalog,
    scorer: Arc<dyn Scorer>,
    locator: Arc<dyn LocationProvider>,
) -> Kiosk<'c, Vec<u8>> {
    let flow = Questionnaire::new(catalog, session(), AnswerStore::new());
    Kiosk::new(flow, timings(), scorer, locator, Vec::new())
}

fn screen(kiosk: &Kiosk<'_, Vec<u8>>) -> String {
    String::from_utf8_lossy(kiosk.output()).into_owned()
}

async fn next_event(kiosk: &mut Kiosk<'_, Vec<u8>>) -> Event {
    tokio::time::timeout(Duration::from_secs(5), kiosk.next_event())
        .await
        .unwrap()
        .unwrap()
}

#[tokio::test]
async fn typed_answer_advances_on_enter() {
    let catalog = catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(NoLocation));

    kiosk.handle_line("34").unwrap();
    assert_eq!(kiosk.flow().cursor(), 1);
    assert!(screen(&kiosk).contains("Étape 2 / 3"));
}

#[tokio::test]
async fn rejected_value_is_shown_inline() {
    let catalog = catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(NoLocation));

    kiosk.handle_line("130").unwrap();
    assert_eq!(kiosk.flow().cursor(), 0);
    assert!(screen(&kiosk).contains("! La valeur maximale est 120"));

    kiosk.handle_line("trente").unwrap();
    assert!(screen(&kiosk).contains("! Veuillez saisir un nombre"));
}

#[tokio::test]
async fn choice_auto_advances_after_the_delay() {
    let catalog = catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(NoLocation));
    kiosk.handle_line("34").unwrap();

    kiosk.handle_line("2").unwrap();
    assert_eq!(kiosk.flow().cursor(), 1);

    let event = next_event(&mut kiosk).await;
    assert!(matches!(event, Event::AutoAdvance(_)));
    kiosk.handle_event(event).unwrap();
    assert_eq!(kiosk.flow().cursor(), 2);
}

#[tokio::test]
async fn going_back_cancels_a_pending_auto_advance() {
    let catalog = catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(NoLocation));
    kiosk.handle_line("34").unwrap();

    kiosk.handle_line("2").unwrap();
    kiosk.handle_line("<").unwrap();
    assert_eq!(kiosk.flow().cursor(), 0);

    let waited = tokio::time::timeout(Duration::from_millis(100), kiosk.next_event()).await;
    assert!(waited.is_err(), "the aborted timer must not fire");
    assert_eq!(kiosk.flow().cursor(), 0);
}

#[tokio::test]
async fn completed_flow_is_scored_and_reported() {
    let catalog = catalog();
    let scorer = FakeScorer::new(0);
    let mut kiosk = kiosk(&catalog, scorer.clone(), Arc::new(NoLocation));

    kiosk.handle_line("34").unwrap();
    kiosk.handle_line("1").unwrap();
    kiosk.handle_line("").unwrap();
    kiosk.handle_line("38,5").unwrap();
    assert!(matches!(kiosk.phase(), Phase::Submitting(_)));

    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();

    let Phase::Report { submission, triage } = kiosk.phase() else {
        panic!("expected the report, got {:?}", kiosk.phase());
    };
    assert_eq!(submission.number(fields::TEMPERATURE_C), Some(38.5));
    assert_eq!(triage.risk_level, RiskLevel::Modere);
    assert!(screen(&kiosk).contains("RISQUE MODÉRÉ"));
    assert!(screen(&kiosk).contains("Traitement ambulatoire"));
    assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn new_test_starts_over_with_the_same_operator() {
    let catalog = catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(NoLocation));
    for line in ["34", "1", "", "37"] {
        kiosk.handle_line(line).unwrap();
    }
    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();

    kiosk.handle_line("n").unwrap();
    assert_eq!(kiosk.phase(), &Phase::Asking);
    assert!(kiosk.flow().answers().is_empty());
    assert_eq!(kiosk.flow().cursor(), 0);
    assert_eq!(kiosk.flow().session().nurse_name, "Awa Koné");
}

#[tokio::test]
async fn failed_scoring_alerts_and_allows_resubmit() {
    let catalog = catalog();
    let scorer = FakeScorer::new(1);
    let mut kiosk = kiosk(&catalog, scorer.clone(), Arc::new(NoLocation));
    for line in ["34", "1", "", "39"] {
        kiosk.handle_line(line).unwrap();
    }

    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();
    assert!(matches!(kiosk.phase(), Phase::Failed(_)));
    assert!(screen(&kiosk).contains(FAILURE_ALERT));

    kiosk.handle_line("r").unwrap();
    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();
    assert!(matches!(kiosk.phase(), Phase::Report { .. }));
    assert_eq!(scorer.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_scoring_can_reopen_the_answers() {
    let catalog = catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(1), Arc::new(NoLocation));
    for line in ["34", "1", "", "39"] {
        kiosk.handle_line(line).unwrap();
    }
    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();

    kiosk.handle_line("<").unwrap();
    assert_eq!(kiosk.phase(), &Phase::Asking);
    assert_eq!(kiosk.flow().current().unwrap().field, fields::TEMPERATURE_C);
    assert_eq!(kiosk.flow().answers().number(fields::TEMPERATURE_C), Some(39.0));
}

fn location_catalog() -> Catalog {
    Catalog::new(vec![
        QuestionDefinition::location(fields::GPS_LATITUDE, fields::GPS_LONGITUDE, "Position"),
        QuestionDefinition::new(fields::TEMPERATURE_C, QuestionKind::Numeric, "Température")
            .required(),
    ])
}

#[tokio::test]
async fn captured_position_is_written_and_advances() {
    let catalog = location_catalog();
    let here = Coordinates {
        latitude: 5.3599,
        longitude: -4.0083,
    };
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(FixedLocation::new(here)));

    kiosk.handle_line("g").unwrap();
    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();

    assert_eq!(kiosk.flow().cursor(), 1);
    assert_eq!(kiosk.flow().answers().number(fields::GPS_LATITUDE), Some(5.3599));
    assert_eq!(kiosk.flow().answers().number(fields::GPS_LONGITUDE), Some(-4.0083));
}

#[tokio::test]
async fn failed_position_keeps_the_question_pending() {
    let catalog = location_catalog();
    let mut kiosk = kiosk(&catalog, FakeScorer::new(0), Arc::new(NoLocation));

    kiosk.handle_line("g").unwrap();
    let event = next_event(&mut kiosk).await;
    kiosk.handle_event(event).unwrap();

    assert_eq!(kiosk.flow().cursor(), 0);
    assert!(kiosk.flow().answers().is_empty());
    assert!(screen(&kiosk).contains("Position indisponible"));

    // the question is optional, Enter skips it
    kiosk.handle_line("").unwrap();
    assert_eq!(kiosk.flow().cursor(), 1);
}

#[tokio::test]
async fn login_insists_on_both_fields() {
    let input: &[u8] = b"\nCSU Cocody\nAwa Kone\n\n";
    let mut lines = input.lines();
    let mut out = Vec::new();
    let config = KiosqueConfig {
        health_center: "CSU Yopougon".to_string(),
        ..KiosqueConfig::default()
    };

    let session = login(&mut lines, &mut out, &config).await.unwrap().unwrap();

    assert_eq!(session.nurse_name, "Awa Kone");
    assert_eq!(session.health_center, "CSU Yopougon");
    assert_eq!(session.robot_id, config.robot_id);
    assert!(String::from_utf8_lossy(&out).contains(LOGIN_INCOMPLETE));
}

#[tokio::test]
async fn login_gives_up_when_input_closes() {
    let input: &[u8] = b"Awa\n";
    let mut lines = input.lines();
    let mut out = Vec::new();
    let session = login(&mut lines, &mut out, &KiosqueConfig::default()).await.unwrap();
    assert!(session.is_none());
}
