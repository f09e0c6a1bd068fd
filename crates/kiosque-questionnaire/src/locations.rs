//! Administrative location tree used by the dependent-choice questions.
//!
//! Three levels: district → region → commune. Read-only reference data;
//! the kiosk ships an extract covering the pilot sites.

use std::sync::LazyLock;

use serde::Serialize;

use kiosque_core::models::answer::AnswerStore;

use crate::catalog::Catalog;
use crate::error::QuestionnaireError;
use crate::question::{ChoiceOption, QuestionDefinition};

#[derive(Debug, Clone, Serialize)]
pub struct LocationNode {
    pub label: String,
    pub value: String,
    pub children: Vec<LocationNode>,
}

impl LocationNode {
    fn leaf(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            children: Vec::new(),
        }
    }

    fn branch(label: &str, value: &str, children: Vec<LocationNode>) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            children,
        }
    }

    fn as_option(&self) -> ChoiceOption {
        ChoiceOption::new(&self.label, self.value.as_str())
    }
}

/// Côte d'Ivoire districts served by the kiosk network.
pub fn ivory_coast() -> &'static [LocationNode] {
    static TREE: LazyLock<Vec<LocationNode>> = LazyLock::new(|| {
        vec![
            LocationNode::branch(
                "District Autonome d'Abidjan",
                "abidjan",
                vec![LocationNode::branch(
                    "Abidjan",
                    "abidjan_reg",
                    [
                        ("Abobo", "abobo"),
                        ("Adjamé", "adjame"),
                        ("Attécoubé", "attecoube"),
                        ("Cocody", "cocody"),
                        ("Koumassi", "koumassi"),
                        ("Marcory", "marcory"),
                        ("Plateau", "plateau"),
                        ("Port-Bouët", "port_bouet"),
                        ("Treichville", "treichville"),
                        ("Yopougon", "yopougon"),
                        ("Anyama", "anyama"),
                        ("Bingerville", "bingerville"),
                        ("Songon", "songon"),
                    ]
                    .iter()
                    .map(|(label, value)| LocationNode::leaf(label, value))
                    .collect(),
                )],
            ),
            LocationNode::branch(
                "District Autonome de Yamoussoukro",
                "yamoussoukro",
                vec![LocationNode::branch(
                    "Bélier",
                    "belier",
                    vec![
                        LocationNode::leaf("Yamoussoukro", "yamoussoukro_com"),
                        LocationNode::leaf("Attiégouakro", "attiegouakro"),
                    ],
                )],
            ),
            LocationNode::branch(
                "District du Bas-Sassandra",
                "bas_sassandra",
                vec![
                    LocationNode::branch(
                        "Nawa",
                        "nawa",
                        vec![
                            LocationNode::leaf("Soubré", "soubre"),
                            LocationNode::leaf("Méagui", "meagui"),
                            LocationNode::leaf("Buyo", "buyo"),
                            LocationNode::leaf("Gueyo", "gueyo"),
                        ],
                    ),
                    LocationNode::branch(
                        "San-Pédro",
                        "san_pedro_reg",
                        vec![
                            LocationNode::leaf("San-Pédro", "san_pedro_com"),
                            LocationNode::leaf("Tabou", "tabou"),
                        ],
                    ),
                    LocationNode::branch(
                        "Grands-Ponts",
                        "grands_ponts",
                        vec![
                            LocationNode::leaf("Dabou", "dabou"),
                            LocationNode::leaf("Grand-Lahou", "grand_lahou"),
                            LocationNode::leaf("Jacqueville", "jacqueville"),
                        ],
                    ),
                ],
            ),
        ]
    });
    &TREE
}

/// Options for a dependent-choice question, walked down the tree along the
/// answers to its ancestor questions.
///
/// A question without `depends_on` lists the tree roots. An ancestor with
/// no answer yet is an error rather than an empty list.
pub fn dependent_options(
    catalog: &Catalog,
    tree: &[LocationNode],
    question: &QuestionDefinition,
    answers: &AnswerStore,
) -> Result<Vec<ChoiceOption>, QuestionnaireError> {
    let mut level = tree;
    for parent in catalog.dependency_chain(question) {
        let value = answers
            .text(parent)
            .ok_or_else(|| QuestionnaireError::MissingParent {
                field: question.field.clone(),
                parent: parent.to_string(),
            })?;
        let node = level
            .iter()
            .find(|node| node.value == value)
            .ok_or_else(|| QuestionnaireError::UnknownOption {
                field: parent.to_string(),
                value: value.to_string(),
            })?;
        level = &node.children;
    }
    Ok(level.iter().map(LocationNode::as_option).collect())
}

/// Display label for a stored location code, searched at any depth.
pub fn label_for<'t>(tree: &'t [LocationNode], value: &str) -> Option<&'t str> {
    tree.iter().find_map(|node| {
        if node.value == value {
            Some(node.label.as_str())
        } else {
            label_for(&node.children, value)
        }
    })
}
