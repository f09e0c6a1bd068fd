//! kiosque-kiosk library root.
//!
//! Re-exports internal modules so that integration tests can drive the
//! kiosk event loop directly with scripted input and fake collaborators.

pub mod commands;
pub mod config;
pub mod kiosk;
pub mod location;
pub mod login;
pub mod screen;
pub mod state;
