use serde::Serialize;

use kiosque_core::models::answer::{AnswerStore, AnswerValue};

/// Visibility predicate over the current answers.
///
/// Must be pure and total: read answers through the neutral accessors of
/// [`AnswerStore`] so a missing field never panics.
pub type Predicate = fn(&AnswerStore) -> bool;

/// The input widget a question is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    Numeric,
    FreeText,
    Date,
    MultiCheckbox,
    /// Option set resolved from the location tree using the parent answer.
    DependentChoice,
    /// Coordinates captured from the host device.
    DeviceLocation,
}

/// How a value reached the engine. Drives auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Keyed in by the operator; advancing needs an explicit confirm.
    Typed,
    /// Picked from the question's option list.
    Choice,
    /// Picked from the quick-pick suggestions.
    Suggestion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: AnswerValue,
}

impl ChoiceOption {
    pub fn new(label: &str, value: impl Into<AnswerValue>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// One box of a multi-checkbox question; stores a boolean under `field`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkbox {
    pub label: String,
    pub field: String,
}

/// Bounds for numeric answers, pattern for text answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDefinition {
    pub field: String,
    pub kind: QuestionKind,
    pub prompt: String,
    pub help_text: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub rule: Option<ValidationRule>,
    pub options: Vec<ChoiceOption>,
    pub checkboxes: Vec<Checkbox>,
    pub suggestions: Vec<ChoiceOption>,
    pub depends_on: Option<String>,
    /// Second coordinate written by a device-location question.
    pub longitude_field: Option<String>,
    /// Advance as soon as a choice is picked, even for non single-choice kinds.
    pub auto_advance: bool,
    #[serde(skip)]
    pub visible_if: Option<Predicate>,
}

impl QuestionDefinition {
    pub fn new(field: &str, kind: QuestionKind, prompt: &str) -> Self {
        Self {
            field: field.to_string(),
            kind,
            prompt: prompt.to_string(),
            help_text: None,
            placeholder: None,
            required: false,
            rule: None,
            options: Vec::new(),
            checkboxes: Vec::new(),
            suggestions: Vec::new(),
            depends_on: None,
            longitude_field: None,
            auto_advance: kind == QuestionKind::SingleChoice,
            visible_if: None,
        }
    }

    pub fn location(latitude_field: &str, longitude_field: &str, prompt: &str) -> Self {
        let mut question = Self::new(latitude_field, QuestionKind::DeviceLocation, prompt);
        question.longitude_field = Some(longitude_field.to_string());
        question
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, text: &str) -> Self {
        self.help_text = Some(text.to_string());
        self
    }

    pub fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        let rule = self.rule.get_or_insert_with(ValidationRule::default);
        rule.min = Some(min);
        rule.max = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.rule.get_or_insert_with(ValidationRule::default).pattern = Some(pattern.to_string());
        self
    }

    pub fn options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    pub fn suggestions(mut self, suggestions: Vec<ChoiceOption>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn checkboxes(mut self, boxes: &[(&str, &str)]) -> Self {
        self.checkboxes = boxes
            .iter()
            .map(|(label, field)| Checkbox {
                label: label.to_string(),
                field: field.to_string(),
            })
            .collect();
        self
    }

    pub fn depends_on(mut self, parent: &str) -> Self {
        self.depends_on = Some(parent.to_string());
        self
    }

    pub fn advance_on_choice(mut self) -> Self {
        self.auto_advance = true;
        self
    }

    pub fn visible_if(mut self, predicate: Predicate) -> Self {
        self.visible_if = Some(predicate);
        self
    }

    pub fn is_visible(&self, answers: &AnswerStore) -> bool {
        self.visible_if.is_none_or(|predicate| predicate(answers))
    }

    /// Every answer key this question writes.
    pub fn owned_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.field.as_str()];
        fields.extend(self.checkboxes.iter().map(|c| c.field.as_str()));
        fields.extend(self.longitude_field.as_deref());
        fields
    }

    pub fn owns(&self, field: &str) -> bool {
        self.owned_fields().contains(&field)
    }

    /// Whether recording a value from `source` should schedule an advance.
    pub fn advances_on(&self, source: InputSource) -> bool {
        match source {
            InputSource::Typed => false,
            InputSource::Suggestion => true,
            InputSource::Choice => self.auto_advance,
        }
    }
}
