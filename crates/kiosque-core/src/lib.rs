//! kiosque-core
//!
//! Pure domain types and field-key conventions.
//! No I/O. This is the shared vocabulary of the Kiosque Santé system.

pub mod error;
pub mod fields;
pub mod models;
