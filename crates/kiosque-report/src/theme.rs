use serde::{Deserialize, Serialize};

/// Palette of the report, chosen from the risk band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTheme {
    /// Palette name, also used as a CSS class in the HTML export.
    pub name: String,

    /// Accent color for the score ring and the orientation banner.
    pub hex: String,

    /// Light background behind the score block.
    pub light_hex: String,
}

impl ReportTheme {
    fn new(name: &str, hex: &str, light_hex: &str) -> Self {
        Self {
            name: name.to_string(),
            hex: hex.to_string(),
            light_hex: light_hex.to_string(),
        }
    }
}

/// Pick the palette from a risk label.
///
/// Matching is on the lowercased label so backend variants such as
/// "FAIBLE" or "Risque modéré" still land on the right palette. Anything
/// that is neither low nor moderate is treated as high.
pub fn theme_for(risk_label: &str) -> ReportTheme {
    let label = risk_label.to_lowercase();
    if label.contains("faible") {
        ReportTheme::new("emerald", "#059669", "#ecfdf5")
    } else if label.contains("modéré") {
        ReportTheme::new("amber", "#f59e0b", "#fffbeb")
    } else {
        ReportTheme::new("red", "#dc2626", "#fef2f2")
    }
}
