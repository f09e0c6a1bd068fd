//! kiosque-report
//!
//! Consultation report shown to the operator after triage, rendered from
//! Tera templates as plain text for the kiosk screen or HTML for export.

pub mod context;
pub mod error;
pub mod render;
pub mod theme;

pub use context::ReportContext;
pub use render::{ReportFormat, render_report};
pub use theme::{ReportTheme, theme_for};
