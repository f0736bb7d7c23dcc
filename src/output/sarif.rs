use crate::error::Result;
use crate::rules::{RuleEngine, Severity, VulnerabilityFinding};
use crate::ScanReport;

use serde_json::{json, Value};

/// Render vulnerability findings as SARIF 2.1.0.
///
/// Every finding is located at the scanned page URL; the matched excerpt is
/// carried as the region snippet.
pub fn render(report: &ScanReport) -> Result<String> {
    let findings = &report.result.vulnerabilities;
    let scanned_url = &report.result.metadata.scanned_url;

    let rules: Vec<Value> = RuleEngine::new()
        .list_rules()
        .into_iter()
        .filter(|rule| findings.iter().any(|f| f.id == rule.id))
        .map(|rule| {
            let mut value = json!({
                "id": rule.id,
                "name": rule.name,
                "shortDescription": { "text": rule.name },
                "fullDescription": { "text": rule.description },
                "defaultConfiguration": {
                    "level": severity_to_sarif_level(rule.default_severity),
                },
            });
            if let Some(cwe) = &rule.cwe_id {
                value["properties"] = json!({
                    "tags": [cwe, rule.category.to_string()],
                });
            }
            value
        })
        .collect();

    let results: Vec<Value> = findings
        .iter()
        .map(|f| result_for(f, scanned_url))
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "aurarecon",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "invocations": [{
                "executionSuccessful": report.result.success,
                "startTimeUtc": report.scanned_at.to_rfc3339(),
            }],
            "results": results,
            "automationDetails": {
                "id": format!("aurarecon/{}", scanned_url),
            },
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

fn result_for(finding: &VulnerabilityFinding, scanned_url: &str) -> Value {
    let message = format!(
        "{} ({} occurrence(s))",
        finding.description, finding.occurrence_count
    );
    json!({
        "ruleId": finding.id,
        "level": severity_to_sarif_level(finding.severity),
        "message": { "text": message },
        "locations": [{
            "physicalLocation": {
                "artifactLocation": { "uri": scanned_url },
                "region": { "snippet": { "text": finding.matched_excerpt } },
            },
        }],
        "fixes": [{
            "description": { "text": finding.recommendation },
        }],
        "properties": { "occurrenceCount": finding.occurrence_count },
    })
}

fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low | Severity::Info => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_report;

    #[test]
    fn emits_only_triggered_rules() {
        let sarif: Value = serde_json::from_str(&render(&sample_report()).unwrap()).unwrap();
        let run = &sarif["runs"][0];
        assert_eq!(sarif["version"], "2.1.0");
        assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 1);
        assert_eq!(run["results"][0]["ruleId"], "AURA-001");
        assert_eq!(run["results"][0]["level"], "error");
        assert_eq!(
            run["results"][0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"],
            "https://site.example.com/s/"
        );
    }
}
