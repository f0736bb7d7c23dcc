mod apex;
mod disclosure;
mod dom;
mod messaging;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Detector, RuleMetadata, Severity, VulnCategory, VulnerabilityFinding};
use crate::parser::params::floor_char_boundary;

/// Maximum characters of matched text kept in a finding.
pub const EXCERPT_LIMIT: usize = 120;

/// Returns all built-in detectors, in rule-id order.
pub fn all_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(messaging::wildcard_post_message()),
        Box::new(messaging::unchecked_message_listener()),
        Box::new(apex::without_sharing()),
        Box::new(disclosure::session_id_exposed()),
        Box::new(apex::dynamic_soql()),
        Box::new(disclosure::session_token_literal()),
        Box::new(dom::raw_html_sink()),
    ]
}

/// A detector backed by a single regular expression.
///
/// With `unless_followed_by` set, a match only counts when the guard
/// pattern does not occur within the given number of bytes after it.
pub struct PatternRule {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub severity: Severity,
    pub category: VulnCategory,
    pub recommendation: &'static str,
    pub cwe_id: Option<&'static str>,
    pub pattern: &'static Lazy<Regex>,
    pub unless_followed_by: Option<(&'static Lazy<Regex>, usize)>,
}

impl PatternRule {
    fn counts(&self, text: &str, match_end: usize) -> bool {
        match self.unless_followed_by {
            None => true,
            Some((guard, window)) => {
                let end = floor_char_boundary(text, match_end + window);
                !guard.is_match(&text[match_end..end])
            }
        }
    }
}

fn excerpt(matched: &str) -> String {
    matched.chars().take(EXCERPT_LIMIT).collect()
}

impl Detector for PatternRule {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata {
            id: self.id.into(),
            name: self.name.into(),
            description: self.description.into(),
            default_severity: self.severity,
            category: self.category,
            cwe_id: self.cwe_id.map(Into::into),
        }
    }

    fn detect(&self, text: &str) -> Option<VulnerabilityFinding> {
        let mut hits = self
            .pattern
            .find_iter(text)
            .filter(|m| self.counts(text, m.end()));
        let first = hits.next()?;
        let occurrence_count = 1 + hits.count();

        Some(VulnerabilityFinding {
            id: self.id.into(),
            name: self.name.into(),
            description: self.description.into(),
            severity: self.severity,
            category: self.category,
            matched_excerpt: excerpt(first.as_str()),
            recommendation: self.recommendation.into(),
            occurrence_count,
            cwe_id: self.cwe_id.map(Into::into),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LONG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"x+").unwrap());

    fn long_rule() -> PatternRule {
        PatternRule {
            id: "T-1",
            name: "long",
            description: "",
            severity: Severity::Low,
            category: VulnCategory::Xss,
            recommendation: "",
            cwe_id: None,
            pattern: &LONG_RE,
            unless_followed_by: None,
        }
    }

    #[test]
    fn excerpt_is_truncated() {
        let text = "x".repeat(500);
        let finding = long_rule().detect(&text).unwrap();
        assert_eq!(finding.matched_excerpt.len(), EXCERPT_LIMIT);
        assert_eq!(finding.occurrence_count, 1);
    }

    #[test]
    fn excerpt_truncation_respects_multibyte() {
        let excerpt = excerpt(&"é".repeat(200));
        assert_eq!(excerpt.chars().count(), EXCERPT_LIMIT);
    }

    #[test]
    fn no_match_is_none() {
        assert!(long_rule().detect("yyy").is_none());
    }
}
