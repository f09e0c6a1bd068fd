//! Operator input on the kiosk terminal.
//!
//! Every line typed by the operator is turned into one [`Action`] against
//! the question on screen. `<` goes back and `q` quits everywhere.

use kiosque_core::models::answer::AnswerValue;
use kiosque_questionnaire::question::ChoiceOption;
use kiosque_questionnaire::{InputSource, QuestionDefinition, QuestionKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Back,
    Quit,
    /// Validate the current answer and move on.
    Advance,
    Record {
        field: String,
        value: AnswerValue,
        source: InputSource,
        /// Typed answers are committed with the same Enter press.
        then_advance: bool,
    },
    /// Flip these checkbox fields.
    Toggle(Vec<String>),
    Locate,
    Invalid(String),
}

/// Actions available once the questionnaire is complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewTest,
    Resubmit,
    Back,
    Quit,
    Unknown,
}

pub fn interpret(question: &QuestionDefinition, options: &[ChoiceOption], line: &str) -> Action {
    let input = line.trim();
    match input {
        "<" | "retour" => return Action::Back,
        "q" | "quitter" => return Action::Quit,
        "" => return Action::Advance,
        _ => {}
    }

    match question.kind {
        QuestionKind::SingleChoice | QuestionKind::DependentChoice => {
            pick(options, input).map_or_else(invalid_choice, |option| Action::Record {
                field: question.field.clone(),
                value: option.value.clone(),
                source: InputSource::Choice,
                then_advance: false,
            })
        }
        QuestionKind::Numeric => {
            if let Some(index) = input.strip_prefix('s') {
                return pick(&question.suggestions, index).map_or_else(invalid_choice, |option| {
                    Action::Record {
                        field: question.field.clone(),
                        value: option.value.clone(),
                        source: InputSource::Suggestion,
                        then_advance: false,
                    }
                });
            }
            let value = match parse_number(input) {
                Some(number) => AnswerValue::Number(number),
                None => AnswerValue::Text(input.to_string()),
            };
            typed(question, value)
        }
        QuestionKind::FreeText | QuestionKind::Date => {
            typed(question, AnswerValue::Text(input.to_string()))
        }
        QuestionKind::MultiCheckbox => {
            let fields: Option<Vec<String>> = input
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|part| !part.is_empty())
                .map(|part| {
                    part.parse::<usize>()
                        .ok()
                        .and_then(|n| question.checkboxes.get(n.checked_sub(1)?))
                        .map(|checkbox| checkbox.field.clone())
                })
                .collect();
            match fields {
                Some(fields) if !fields.is_empty() => Action::Toggle(fields),
                _ => invalid_choice(),
            }
        }
        QuestionKind::DeviceLocation => match input {
            "g" | "gps" => Action::Locate,
            _ => Action::Invalid("Tapez g pour capturer la position".to_string()),
        },
    }
}

pub fn interpret_menu(line: &str) -> MenuAction {
    match line.trim() {
        "n" | "nouveau" => MenuAction::NewTest,
        "r" | "renvoyer" => MenuAction::Resubmit,
        "<" | "retour" => MenuAction::Back,
        "q" | "quitter" => MenuAction::Quit,
        _ => MenuAction::Unknown,
    }
}

/// Numbers may be typed with a decimal comma.
pub fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn typed(question: &QuestionDefinition, value: AnswerValue) -> Action {
    Action::Record {
        field: question.field.clone(),
        value,
        source: InputSource::Typed,
        then_advance: true,
    }
}

/// One-based index into a list of options.
fn pick<'a>(options: &'a [ChoiceOption], input: &str) -> Option<&'a ChoiceOption> {
    let index = input.trim().parse::<usize>().ok()?;
    options.get(index.checked_sub(1)?)
}

fn invalid_choice() -> Action {
    Action::Invalid("Choix invalide".to_string())
}
