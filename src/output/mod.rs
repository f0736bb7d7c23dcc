pub mod console;
pub mod json;
pub mod sarif;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ScanReport;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }
}

/// Render a report into the specified format.
pub fn render(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(report)),
        OutputFormat::Json => json::render(report),
        OutputFormat::Sarif => sarif::render(report),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::analysis::enrich;
    use crate::ir::{ActionDescriptor, DescriptorSyntax, GuestSession, ScanMetadata, ScanResult};
    use crate::rules::policy::Policy;
    use crate::rules::RuleEngine;
    use crate::ScanReport;

    /// A small report with one known and one unknown action and one finding.
    pub fn sample_report() -> ScanReport {
        let controllers = vec![
            enrich(
                ActionDescriptor::new("RecordUiController", "deleteRecord", DescriptorSyntax::Aura),
                "",
            ),
            enrich(
                ActionDescriptor::new("WidgetController", "getWidgets", DescriptorSyntax::Apex),
                "",
            ),
        ];
        let vulnerabilities = RuleEngine::new().detect(r#"parent.postMessage(x, "*");"#);
        let result = ScanResult::new(
            controllers,
            ScanMetadata {
                fwuid: Some("fw-1".into()),
                scanned_url: "https://site.example.com/s/".into(),
                ..Default::default()
            },
            GuestSession::default(),
            vulnerabilities,
            2,
            1024,
            35,
            vec!["Failed to fetch script https://site.example.com/x.js: 404 Not Found".into()],
        );
        let verdict = Policy::default().evaluate(&result);
        ScanReport {
            result,
            verdict,
            scanned_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }
}
