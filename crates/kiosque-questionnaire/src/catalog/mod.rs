pub mod intake;

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::QuestionnaireError;
use crate::question::QuestionDefinition;

/// The fixed, ordered list of questions a flow walks through.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<QuestionDefinition>,
}

impl Catalog {
    pub fn new(questions: Vec<QuestionDefinition>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.field == field)
    }

    /// The question that writes `field`, including checkbox and coordinate fields.
    pub fn owner_of(&self, field: &str) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|q| q.owns(field))
    }

    /// Structural self-check: unique answer keys, resolvable dependencies,
    /// well-formed rules, and no dependency cycles.
    pub fn check(&self) -> Result<(), QuestionnaireError> {
        let mut seen = BTreeSet::new();
        for question in &self.questions {
            for field in question.owned_fields() {
                if !seen.insert(field) {
                    return Err(QuestionnaireError::DuplicateField(field.to_string()));
                }
            }
        }

        for question in &self.questions {
            if let Some(parent) = &question.depends_on
                && self.get(parent).is_none()
            {
                return Err(QuestionnaireError::DanglingDependency {
                    field: question.field.clone(),
                    parent: parent.clone(),
                });
            }
            if self.dependency_chain(question).len() >= self.questions.len() {
                return Err(QuestionnaireError::InvalidRule {
                    field: question.field.clone(),
                    reason: "dependency cycle".to_string(),
                });
            }
            check_rule(question)?;
        }
        Ok(())
    }

    /// Ancestor fields of a dependent question, root first.
    ///
    /// Stops after `len()` hops so a malformed catalog cannot loop.
    pub fn dependency_chain<'a>(&'a self, question: &'a QuestionDefinition) -> Vec<&'a str> {
        let mut chain = Vec::new();
        let mut parent = question.depends_on.as_deref();
        while let Some(field) = parent {
            chain.push(field);
            if chain.len() >= self.questions.len() {
                break;
            }
            parent = self.get(field).and_then(|q| q.depends_on.as_deref());
        }
        chain.reverse();
        chain
    }

    /// Questions whose dependency chain passes through `field`.
    pub fn dependents_of<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a QuestionDefinition> {
        self.questions
            .iter()
            .filter(move |q| self.dependency_chain(q).contains(&field))
    }
}

fn check_rule(question: &QuestionDefinition) -> Result<(), QuestionnaireError> {
    let Some(rule) = &question.rule else {
        return Ok(());
    };
    let invalid = |reason: String| QuestionnaireError::InvalidRule {
        field: question.field.clone(),
        reason,
    };

    if let (Some(min), Some(max)) = (rule.min, rule.max)
        && min > max
    {
        return Err(invalid(format!("min {min} is greater than max {max}")));
    }
    if let Some(pattern) = &rule.pattern {
        Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}
