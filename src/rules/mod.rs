pub mod builtin;
pub mod finding;
pub mod policy;

pub use finding::{RuleMetadata, Severity, VulnCategory, VulnerabilityFinding};

/// A detector checks one body of text and reports at most one finding.
pub trait Detector: Send + Sync {
    /// Metadata about this rule (id, name, severity, CWE).
    fn metadata(&self) -> RuleMetadata;

    /// Run the detector against retrieved text.
    fn detect(&self, text: &str) -> Option<VulnerabilityFinding>;
}

/// The rule engine runs all registered detectors against a text.
pub struct RuleEngine {
    detectors: Vec<Box<dyn Detector>>,
}

impl RuleEngine {
    /// Create a new engine with all built-in detectors registered.
    pub fn new() -> Self {
        Self {
            detectors: builtin::all_detectors(),
        }
    }

    /// Run all detectors; the result holds at most one finding per rule id.
    pub fn detect(&self, text: &str) -> Vec<VulnerabilityFinding> {
        self.detectors.iter().filter_map(|d| d.detect(text)).collect()
    }

    /// List metadata for all registered rules.
    pub fn list_rules(&self) -> Vec<RuleMetadata> {
        self.detectors.iter().map(|d| d.metadata()).collect()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_ids_are_unique() {
        let rules = RuleEngine::new().list_rules();
        let ids: HashSet<_> = rules.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids.len(), rules.len());
        assert_eq!(rules.len(), 7);
    }

    #[test]
    fn repeated_wildcard_post_message_is_one_finding() {
        let text = r#"
            parent.postMessage(data, "*");
            window.top.postMessage({a: 1}, '*');
            frame.contentWindow.postMessage(msg, "*");
        "#;
        let findings = RuleEngine::new().detect(text);
        let wildcard: Vec<_> = findings.iter().filter(|f| f.id == "AURA-001").collect();
        assert_eq!(wildcard.len(), 1);
        assert_eq!(wildcard[0].occurrence_count, 3);
        assert!(wildcard[0].matched_excerpt.starts_with("postMessage(data"));
    }

    #[test]
    fn clean_text_has_no_findings() {
        let findings = RuleEngine::new().detect("<html><body>hello</body></html>");
        assert!(findings.is_empty());
    }

    #[test]
    fn findings_are_independent_per_rule() {
        let text = r#"
            public without sharing class Svc {}
            el.innerHTML = userInput;
        "#;
        let ids: Vec<_> = RuleEngine::new()
            .detect(text)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(ids, vec!["AURA-003".to_string(), "AURA-007".to_string()]);
    }
}
