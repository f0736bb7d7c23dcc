//! Pass/fail gate over a finished scan.
//!
//! Two independent gates feed the verdict: vulnerability findings at or above
//! `fail_on`, and (when configured) discovered actions at or above
//! `fail_on_action_risk`. Ignore lists and severity overrides are applied
//! before either gate looks at anything.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Severity, VulnerabilityFinding};
use crate::ir::{EnrichedAction, RiskLevel, ScanResult};

/// Outcome of `Policy::evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyVerdict {
    pub pass: bool,
    /// Findings left after the ignore list.
    pub effective_findings: usize,
    pub suppressed_findings: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
    /// Riskiest action discovered, ignored actions included.
    pub highest_action_risk: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_risk_threshold: Option<RiskLevel>,
    /// `Controller.action` names that tripped the action gate.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub gated_actions: Vec<String>,
}

/// `[policy]` section of `.aurarecon.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Minimum finding severity that fails the scan.
    pub fail_on: Severity,
    /// Minimum action risk that fails the scan; unset disables the gate.
    pub fail_on_action_risk: Option<RiskLevel>,
    /// Rule ids dropped from the report.
    pub ignore_rules: HashSet<String>,
    /// `Controller.action` pairs the action gate skips.
    pub ignore_actions: HashSet<String>,
    /// Rule id → severity.
    pub overrides: HashMap<String, Severity>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: Severity::High,
            fail_on_action_risk: None,
            ignore_rules: HashSet::new(),
            ignore_actions: HashSet::new(),
            overrides: HashMap::new(),
        }
    }
}

fn action_label(action: &EnrichedAction) -> String {
    format!("{}.{}", action.action.controller, action.action.name)
}

impl Policy {
    /// Severity a finding counts at, or `None` when its rule is ignored.
    fn effective_severity(&self, finding: &VulnerabilityFinding) -> Option<Severity> {
        if self.ignore_rules.contains(&finding.id) {
            return None;
        }
        Some(self.overrides.get(&finding.id).copied().unwrap_or(finding.severity))
    }

    /// Actions at or above the action-risk threshold, in discovery order.
    fn gated_actions(&self, actions: &[EnrichedAction]) -> Vec<String> {
        let Some(threshold) = self.fail_on_action_risk else {
            return Vec::new();
        };
        actions
            .iter()
            .filter(|a| a.risk_level >= threshold)
            .map(action_label)
            .filter(|label| !self.ignore_actions.contains(label))
            .collect()
    }

    /// Judge raw scan output. Call before `apply` so suppressed counts are known.
    pub fn evaluate(&self, result: &ScanResult) -> PolicyVerdict {
        let severities: Vec<Severity> = result
            .vulnerabilities
            .iter()
            .filter_map(|f| self.effective_severity(f))
            .collect();
        let highest_severity = severities.iter().copied().max();
        let findings_fail = highest_severity.is_some_and(|s| s >= self.fail_on);

        let gated_actions = self.gated_actions(&result.controllers);

        PolicyVerdict {
            pass: !findings_fail && gated_actions.is_empty(),
            effective_findings: severities.len(),
            suppressed_findings: result.vulnerabilities.len() - severities.len(),
            highest_severity,
            fail_threshold: self.fail_on,
            highest_action_risk: result.highest_action_risk(),
            action_risk_threshold: self.fail_on_action_risk,
            gated_actions,
        }
    }

    /// Drop ignored findings and rewrite overridden severities.
    pub fn apply(&self, findings: Vec<VulnerabilityFinding>) -> Vec<VulnerabilityFinding> {
        findings
            .into_iter()
            .filter_map(|mut f| {
                f.severity = self.effective_severity(&f)?;
                Some(f)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::enrich;
    use crate::ir::{ActionDescriptor, DescriptorSyntax, GuestSession, ScanMetadata};
    use crate::rules::RuleEngine;

    fn result_with(actions: &[(&str, &str)], page: &str) -> ScanResult {
        let controllers = actions
            .iter()
            .map(|(c, n)| enrich(ActionDescriptor::new(c, n, DescriptorSyntax::Aura), ""))
            .collect();
        ScanResult::new(
            controllers,
            ScanMetadata::default(),
            GuestSession::default(),
            RuleEngine::new().detect(page),
            0,
            page.len(),
            0,
            vec![],
        )
    }

    #[test]
    fn high_finding_fails_by_default() {
        let result = result_with(&[], r#"w.postMessage(d, "*");"#);
        let verdict = Policy::default().evaluate(&result);
        assert!(!verdict.pass);
        assert_eq!(verdict.highest_severity, Some(Severity::High));
        assert!(verdict.gated_actions.is_empty());
    }

    #[test]
    fn medium_finding_passes_by_default() {
        let result = result_with(&[], "el.innerHTML = x;");
        assert!(Policy::default().evaluate(&result).pass);
    }

    #[test]
    fn ignored_rule_is_suppressed_and_dropped() {
        let mut policy = Policy::default();
        policy.ignore_rules.insert("AURA-004".into());
        let result = result_with(&[], "var s = '{!$Api.Session_ID}';");

        let verdict = policy.evaluate(&result);
        assert!(verdict.pass);
        assert_eq!(verdict.effective_findings, 0);
        assert_eq!(verdict.suppressed_findings, 1);
        assert!(policy.apply(result.vulnerabilities).is_empty());
    }

    #[test]
    fn override_downgrades_severity() {
        let mut policy = Policy::default();
        policy.overrides.insert("AURA-003".into(), Severity::Info);
        let result = result_with(&[], "public without sharing class Svc {}");

        assert!(policy.evaluate(&result).pass);
        assert_eq!(policy.apply(result.vulnerabilities)[0].severity, Severity::Info);
    }

    #[test]
    fn action_gate_is_off_by_default() {
        let result = result_with(&[("RecordUiController", "deleteRecord")], "");
        let verdict = Policy::default().evaluate(&result);
        assert!(verdict.pass);
        assert_eq!(verdict.highest_action_risk, Some(RiskLevel::Critical));
        assert_eq!(verdict.action_risk_threshold, None);
    }

    #[test]
    fn action_gate_fails_on_risky_actions() {
        let policy = Policy {
            fail_on_action_risk: Some(RiskLevel::High),
            ..Policy::default()
        };
        let result = result_with(
            &[
                ("WidgetController", "getWidgets"),
                ("WidgetController", "saveWidget"),
                ("RecordUiController", "deleteRecord"),
            ],
            "",
        );
        let verdict = policy.evaluate(&result);
        assert!(!verdict.pass);
        assert_eq!(
            verdict.gated_actions,
            vec!["WidgetController.saveWidget", "RecordUiController.deleteRecord"]
        );
    }

    #[test]
    fn ignored_actions_do_not_trip_the_gate() {
        let mut policy = Policy {
            fail_on_action_risk: Some(RiskLevel::Critical),
            ..Policy::default()
        };
        policy
            .ignore_actions
            .insert("RecordUiController.deleteRecord".into());
        let result = result_with(&[("RecordUiController", "deleteRecord")], "");

        let verdict = policy.evaluate(&result);
        assert!(verdict.pass);
        // Still reported, just not gated.
        assert_eq!(verdict.highest_action_risk, Some(RiskLevel::Critical));
    }
}
