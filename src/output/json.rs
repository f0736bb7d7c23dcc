use crate::error::Result;
use crate::ir::ScanResult;
use crate::rules::policy::PolicyVerdict;
use crate::ScanReport;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The response envelope plus the policy verdict.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a ScanResult,
    verdict: &'a PolicyVerdict,
    scanned_at: DateTime<Utc>,
}

/// Render a report as JSON.
pub fn render(report: &ScanReport) -> Result<String> {
    let report = JsonReport {
        result: &report.result,
        verdict: &report.verdict,
        scanned_at: report.scanned_at,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
