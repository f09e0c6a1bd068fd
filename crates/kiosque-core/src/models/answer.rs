use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single recorded answer.
///
/// Enumerated answers (gender, trimester, location codes) are stored as
/// `Text` holding the option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AnswerValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of the answer. `NaN` reads as no number at all.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for values that count as "nothing entered": blank text or `NaN`.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Bool(_) => false,
            AnswerValue::Number(n) => n.is_nan(),
            AnswerValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Bool(b)
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<i32> for AnswerValue {
    fn from(n: i32) -> Self {
        AnswerValue::Number(f64::from(n))
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// Field key → answer mapping accumulated while the questionnaire runs.
///
/// Readers never fail on missing keys: an absent flag reads `false`, an
/// absent number reads `None` and so satisfies no comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerStore(BTreeMap<String, AnswerValue>);

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with default answers.
    pub fn seeded<K, V>(defaults: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AnswerValue>,
    {
        Self(
            defaults
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Record an answer, returning the value it replaced.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<AnswerValue>) -> Option<AnswerValue> {
        self.0.insert(field.into(), value.into())
    }

    pub fn flag(&self, field: &str) -> bool {
        self.get(field).and_then(AnswerValue::as_bool).unwrap_or(false)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(AnswerValue::as_number)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(AnswerValue::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.0.remove(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of the store keeping only the entries `keep` accepts.
    pub fn filtered(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(k, _)| keep(k))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    pub fn into_map(self) -> BTreeMap<String, AnswerValue> {
        self.0
    }
}
