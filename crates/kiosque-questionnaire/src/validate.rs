use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use kiosque_core::models::answer::AnswerValue;

use crate::question::{QuestionDefinition, QuestionKind};

/// Why a candidate answer was refused. The display text is shown inline
/// under the question.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum Rejection {
    #[error("Veuillez remplir ce champ pour continuer")]
    Required,

    #[error("La valeur minimale est {min}")]
    BelowMinimum { min: f64 },

    #[error("La valeur maximale est {max}")]
    AboveMaximum { max: f64 },

    #[error("Veuillez saisir un nombre")]
    NotANumber,

    #[error("Le format saisi n'est pas valide")]
    PatternMismatch,

    #[error("Date invalide (format attendu : AAAA-MM-JJ)")]
    InvalidDate,
}

/// Decide whether `candidate` may be committed for `question`.
///
/// Pure: never touches the answer store. Optional questions accept an
/// absent or blank value.
pub fn validate(question: &QuestionDefinition, candidate: Option<&AnswerValue>) -> Result<(), Rejection> {
    let value = match candidate {
        Some(value) if !value.is_blank() => value,
        _ if question.required => return Err(Rejection::Required),
        _ => return Ok(()),
    };

    match question.kind {
        QuestionKind::Numeric => check_bounds(question, value),
        QuestionKind::FreeText => check_pattern(question, value),
        QuestionKind::Date => {
            check_pattern(question, value)?;
            check_date(value)
        }
        _ => Ok(()),
    }
}

fn check_bounds(question: &QuestionDefinition, value: &AnswerValue) -> Result<(), Rejection> {
    let number = value.as_number().ok_or(Rejection::NotANumber)?;
    let Some(rule) = &question.rule else {
        return Ok(());
    };

    if let Some(min) = rule.min
        && number < min
    {
        return Err(Rejection::BelowMinimum { min });
    }
    if let Some(max) = rule.max
        && number > max
    {
        return Err(Rejection::AboveMaximum { max });
    }
    Ok(())
}

fn check_pattern(question: &QuestionDefinition, value: &AnswerValue) -> Result<(), Rejection> {
    if let Some(pattern) = question.rule.as_ref().and_then(|r| r.pattern.as_deref())
        && let Some(text) = value.as_str()
        && let Ok(regex) = Regex::new(pattern)
        && !regex.is_match(text.trim())
    {
        return Err(Rejection::PatternMismatch);
    }
    Ok(())
}

fn check_date(value: &AnswerValue) -> Result<(), Rejection> {
    value
        .as_str()
        .and_then(|text| text.trim().parse::<jiff::civil::Date>().ok())
        .map(|_| ())
        .ok_or(Rejection::InvalidDate)
}
