use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::context::ReportContext;
use crate::error::ReportError;

const TEXT_TEMPLATE: &str = include_str!("../templates/report.txt");
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Shown on the kiosk terminal.
    Text,
    /// Saved for printing or archival.
    Html,
}

impl ReportFormat {
    fn template(self) -> (&'static str, &'static str) {
        match self {
            ReportFormat::Text => ("report.txt", TEXT_TEMPLATE),
            ReportFormat::Html => ("report.html", HTML_TEMPLATE),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
        }
    }
}

/// Render the consultation report in the requested format.
pub fn render_report(report: &ReportContext, format: ReportFormat) -> Result<String, ReportError> {
    let (name, content) = format.template();
    debug!(template = name, reference = %report.reference, "rendering report");
    render_template(name, content, report)
}

/// Render a Tera template with any serializable value as context.
///
/// The template name decides autoescaping: `.html` templates escape
/// their variables, text templates do not.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    data: &T,
) -> Result<String, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ReportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(data)?;
    let context =
        Context::from_value(value).map_err(|e| ReportError::TemplateRender(e.to_string()))?;

    Ok(tera.render(template_name, &context)?)
}
