//! Text rendering of the kiosk screens.

use std::fmt::Write as _;

use kiosque_core::models::answer::AnswerValue;
use kiosque_questionnaire::question::ChoiceOption;
use kiosque_questionnaire::{QuestionKind, Questionnaire};

pub const LOGIN_TITLE: &str = "Kiosque Santé • Connexion de l'agent";
pub const LOGIN_INCOMPLETE: &str = "Veuillez remplir tous les champs pour continuer.";
pub const SUBMITTING: &str = "Calcul du triage en cours...";
pub const REPORT_MENU: &str = "[n] Nouveau test   [q] Quitter";
pub const FAILURE_MENU: &str = "[r] Renvoyer   [<] Corriger les réponses   [q] Quitter";

/// The question under the cursor with its options, current answer and
/// inline message. `options` are the resolved options for choice kinds.
pub fn question(flow: &Questionnaire<'_>, options: &[ChoiceOption]) -> String {
    let Some(question) = flow.current() else {
        return String::new();
    };
    let answers = flow.answers();
    let (step, total) = flow.progress();
    let mut out = String::new();

    let _ = writeln!(out, "\nÉtape {step} / {total}");
    let _ = writeln!(out, "{}{}", question.prompt, if question.required { " *" } else { "" });
    if let Some(help) = &question.help_text {
        let _ = writeln!(out, "  {help}");
    }

    match question.kind {
        QuestionKind::SingleChoice | QuestionKind::DependentChoice => {
            let current = answers.get(&question.field);
            for (i, option) in options.iter().enumerate() {
                let mark = if current == Some(&option.value) { "●" } else { " " };
                let _ = writeln!(out, "  {mark} [{}] {}", i + 1, option.label);
            }
        }
        QuestionKind::MultiCheckbox => {
            for (i, checkbox) in question.checkboxes.iter().enumerate() {
                let mark = if answers.flag(&checkbox.field) { "x" } else { " " };
                let _ = writeln!(out, "  [{mark}] {}. {}", i + 1, checkbox.label);
            }
            let _ = writeln!(out, "  Numéros à cocher/décocher, Entrée pour valider");
        }
        QuestionKind::DeviceLocation => {
            let _ = writeln!(out, "  [g] Capturer la position   Entrée pour passer");
            if let (Some(lat), Some(lon)) = (
                answers.number(&question.field),
                question.longitude_field.as_deref().and_then(|f| answers.number(f)),
            ) {
                let _ = writeln!(out, "  Position : {lat:.5}, {lon:.5}");
            }
        }
        QuestionKind::Numeric | QuestionKind::FreeText | QuestionKind::Date => {
            if !question.suggestions.is_empty() {
                let picks: Vec<String> = question
                    .suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("[s{}] {}", i + 1, s.label))
                    .collect();
                let _ = writeln!(out, "  {}", picks.join("   "));
            }
            if let Some(value) = answers.get(&question.field) {
                let _ = writeln!(out, "  Valeur actuelle : {}", display_value(value));
            } else if let Some(placeholder) = &question.placeholder {
                let _ = writeln!(out, "  ex. {placeholder}");
            }
        }
    }

    if let Some(error) = flow.error() {
        let _ = writeln!(out, "  ! {error}");
    }
    let _ = write!(out, "[<] Retour   [q] Quitter\n> ");
    out
}

pub fn display_value(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Bool(true) => "Oui".to_string(),
        AnswerValue::Bool(false) => "Non".to_string(),
        AnswerValue::Number(n) if n.fract() == 0.0 => format!("{n:.0}"),
        AnswerValue::Number(n) => n.to_string(),
        AnswerValue::Text(text) => text.clone(),
    }
}
