pub mod answer;
pub mod session;
pub mod submission;
pub mod triage;
