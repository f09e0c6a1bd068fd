//! kiosque-questionnaire
//!
//! Adaptive intake questionnaire engine. Pure and synchronous, no I/O.
//! Decides which question comes next from the answers given so far,
//! validates answers before the flow advances, and packages the final
//! answers for the scoring service.

pub mod catalog;
pub mod controller;
mod emit;
pub mod error;
pub mod flow;
pub mod locations;
pub mod question;
pub mod validate;
pub mod visibility;

pub use catalog::Catalog;
pub use catalog::intake::intake_catalog;
pub use flow::{Coordinates, Questionnaire, Recorded, Step, StepToken};
pub use question::{InputSource, QuestionDefinition, QuestionKind};
pub use validate::{Rejection, validate};
pub use visibility::compute_visible;
