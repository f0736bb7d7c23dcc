use crate::ir::{EnrichedAction, ParamProvenance, RiskLevel};
use crate::rules::{Severity, VulnerabilityFinding};
use crate::ScanReport;

fn risk_tag(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Critical => "[CRITICAL]",
        RiskLevel::High => "[HIGH]    ",
        RiskLevel::Medium => "[MEDIUM]  ",
        RiskLevel::Low => "[LOW]     ",
        RiskLevel::Unknown => "[UNKNOWN] ",
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "[CRITICAL]",
        Severity::High => "[HIGH]    ",
        Severity::Medium => "[MEDIUM]  ",
        Severity::Low => "[LOW]     ",
        Severity::Info => "[INFO]    ",
    }
}

fn render_action(output: &mut String, action: &EnrichedAction) {
    let known = if action.is_known { "known" } else { "inferred" };
    output.push_str(&format!(
        "  {} {}.{} ({}, {})\n",
        risk_tag(action.risk_level),
        action.action.controller,
        action.action.name,
        action.category,
        known,
    ));
    if !action.parameters.is_empty() {
        let params: Vec<String> = action
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.param_type))
            .collect();
        let source = match action.parameter_provenance() {
            Some(ParamProvenance::Known) => "known",
            Some(ParamProvenance::Signature) => "signature",
            _ => "guessed",
        };
        output.push_str(&format!(
            "           params ({}): {}\n",
            source,
            params.join(", ")
        ));
    }
}

fn render_finding(output: &mut String, finding: &VulnerabilityFinding) {
    output.push_str(&format!(
        "  {} {} {} (x{})\n",
        severity_tag(finding.severity),
        finding.id,
        finding.name,
        finding.occurrence_count,
    ));
    output.push_str(&format!("           match: {}\n", finding.matched_excerpt));
    output.push_str(&format!("           fix: {}\n", finding.recommendation));
}

/// Render a report as plain console output: actions by risk, then findings.
pub fn render(report: &ScanReport) -> String {
    let result = &report.result;
    let verdict = &report.verdict;
    let mut output = String::new();

    output.push_str(&format!(
        "\n  Scanned {} ({} bytes, {} script(s), {} ms)\n",
        result.metadata.scanned_url,
        result.page_size,
        result.js_files_scanned,
        result.scan_duration,
    ));
    if let Some(fwuid) = &result.metadata.fwuid {
        output.push_str(&format!("  fwuid: {}\n", fwuid));
    }
    if let Some(app) = &result.metadata.app {
        output.push_str(&format!("  app: {}\n", app));
    }
    output.push_str(&format!(
        "  session: {:?}, {} cookie(s)\n",
        result.guest_session.session_type,
        result.guest_session.cookies.len(),
    ));

    if result.controllers.is_empty() {
        output.push_str("\n  No Aura actions discovered.\n");
    } else {
        // Highest risk first; discovery order within a level.
        let mut sorted: Vec<&EnrichedAction> = result.controllers.iter().collect();
        sorted.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));

        output.push_str(&format!("\n  {} action(s) discovered:\n\n", result.raw_matches));
        for action in sorted {
            render_action(&mut output, action);
        }
    }

    if !result.vulnerabilities.is_empty() {
        let mut sorted: Vec<&VulnerabilityFinding> = result.vulnerabilities.iter().collect();
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.id.cmp(&b.id)));

        output.push_str(&format!("\n  {} finding(s) detected:\n\n", sorted.len()));
        for finding in sorted {
            render_finding(&mut output, finding);
        }
    }

    if !result.warnings.is_empty() {
        output.push_str("\n  Warnings:\n");
        for warning in &result.warnings {
            output.push_str(&format!("    - {}\n", warning));
        }
    }

    if !verdict.gated_actions.is_empty() {
        output.push_str(&format!(
            "\n  Actions at or above {} risk:\n",
            verdict.action_risk_threshold.unwrap_or(RiskLevel::Unknown)
        ));
        for label in &verdict.gated_actions {
            output.push_str(&format!("    - {}\n", label));
        }
    }

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "\n  Result: {} (threshold: {}, highest: {})\n\n",
        status,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures::sample_report;
    use crate::rules::policy::Policy;

    #[test]
    fn lists_actions_by_risk_and_verdict() {
        let text = render(&sample_report());
        let critical = text.find("RecordUiController.deleteRecord").unwrap();
        let medium = text.find("WidgetController.getWidgets").unwrap();
        assert!(critical < medium);
        assert!(text.contains("params (known): recordId: Id"));
        assert!(text.contains("AURA-001"));
        assert!(text.contains("Warnings:"));
        assert!(text.contains("Result: FAIL"));
    }

    #[test]
    fn lists_actions_that_tripped_the_risk_gate() {
        let mut report = sample_report();
        let policy = Policy {
            fail_on_action_risk: Some(RiskLevel::Critical),
            ..Policy::default()
        };
        report.verdict = policy.evaluate(&report.result);

        let text = render(&report);
        assert!(text.contains("Actions at or above critical risk:"));
        assert!(text.contains("    - RecordUiController.deleteRecord\n"));
        assert!(!text.contains("    - WidgetController.getWidgets"));
    }
}
