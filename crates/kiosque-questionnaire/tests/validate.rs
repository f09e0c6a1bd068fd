use kiosque_core::fields;
use kiosque_core::models::answer::AnswerValue;
use kiosque_questionnaire::question::{QuestionDefinition, QuestionKind};
use kiosque_questionnaire::{Rejection, validate};

fn temperature() -> QuestionDefinition {
    QuestionDefinition::new(fields::TEMPERATURE_C, QuestionKind::Numeric, "Température")
        .required()
        .bounds(35.0, 42.0)
}

#[test]
fn temperature_bounds_are_inclusive() {
    let q = temperature();
    assert_eq!(validate(&q, Some(&AnswerValue::Number(35.0))), Ok(()));
    assert_eq!(validate(&q, Some(&AnswerValue::Number(42.0))), Ok(()));
    assert_eq!(
        validate(&q, Some(&AnswerValue::Number(34.9))),
        Err(Rejection::BelowMinimum { min: 35.0 })
    );
    assert_eq!(
        validate(&q, Some(&AnswerValue::Number(42.1))),
        Err(Rejection::AboveMaximum { max: 42.0 })
    );
}

#[test]
fn rejection_messages_are_shown_in_french() {
    assert_eq!(
        Rejection::BelowMinimum { min: 35.0 }.to_string(),
        "La valeur minimale est 35"
    );
    assert_eq!(
        Rejection::AboveMaximum { max: 42.5 }.to_string(),
        "La valeur maximale est 42.5"
    );
    assert_eq!(
        Rejection::Required.to_string(),
        "Veuillez remplir ce champ pour continuer"
    );
}

#[test]
fn required_question_rejects_absent_and_blank_values() {
    let q = temperature();
    assert_eq!(validate(&q, None), Err(Rejection::Required));
    assert_eq!(validate(&q, Some(&AnswerValue::Number(f64::NAN))), Err(Rejection::Required));

    let name = QuestionDefinition::new(fields::PATIENT_ID, QuestionKind::FreeText, "Id").required();
    assert_eq!(validate(&name, Some(&AnswerValue::from("   "))), Err(Rejection::Required));
}

#[test]
fn optional_question_accepts_nothing_but_still_checks_bounds() {
    let muac = QuestionDefinition::new(fields::PERIMETRE_BRACHIAL_MUAC, QuestionKind::Numeric, "MUAC")
        .bounds(60.0, 250.0);
    assert_eq!(validate(&muac, None), Ok(()));
    assert_eq!(
        validate(&muac, Some(&AnswerValue::Number(20.0))),
        Err(Rejection::BelowMinimum { min: 60.0 })
    );
}

#[test]
fn numeric_question_refuses_text() {
    let q = temperature();
    assert_eq!(
        validate(&q, Some(&AnswerValue::from("trente-huit"))),
        Err(Rejection::NotANumber)
    );
}

#[test]
fn free_text_must_match_its_pattern() {
    let q = QuestionDefinition::new(fields::PATIENT_ID, QuestionKind::FreeText, "Id")
        .pattern(r"^[A-Za-z0-9-]{3,20}$");
    assert_eq!(validate(&q, Some(&AnswerValue::from("CI-000123"))), Ok(()));
    assert_eq!(
        validate(&q, Some(&AnswerValue::from("x"))),
        Err(Rejection::PatternMismatch)
    );
}

#[test]
fn dates_must_be_real_calendar_days() {
    let q = QuestionDefinition::new(fields::DERNIERE_DATE_REGLES, QuestionKind::Date, "DDR");
    assert_eq!(validate(&q, Some(&AnswerValue::from("2026-03-14"))), Ok(()));
    assert_eq!(
        validate(&q, Some(&AnswerValue::from("2026-02-30"))),
        Err(Rejection::InvalidDate)
    );
    assert_eq!(
        validate(&q, Some(&AnswerValue::from("14/03/2026"))),
        Err(Rejection::InvalidDate)
    );
}

#[test]
fn validation_does_not_depend_on_call_order() {
    let q = temperature();
    let value = AnswerValue::Number(38.5);
    let first = validate(&q, Some(&value));
    let _ = validate(&q, Some(&AnswerValue::Number(50.0)));
    assert_eq!(validate(&q, Some(&value)), first);
}
