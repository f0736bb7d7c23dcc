use once_cell::sync::Lazy;
use regex::Regex;

use super::PatternRule;
use crate::rules::{Severity, VulnCategory};

// Assignment only; `===` comparisons are not sinks.
static HTML_SINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.(?:inner|outer)HTML\s*=(?:[^=]|$)").unwrap());

/// AURA-007
pub(super) fn raw_html_sink() -> PatternRule {
    PatternRule {
        id: "AURA-007",
        name: "Raw HTML sink assignment",
        description: "Markup is written through innerHTML/outerHTML, bypassing Locker and LWC \
                      template escaping",
        severity: Severity::Medium,
        category: VulnCategory::Xss,
        recommendation: "Render through templates or set textContent; sanitize any markup \
                         that must be injected.",
        cwe_id: Some("CWE-79"),
        pattern: &HTML_SINK_RE,
        unless_followed_by: None,
    }
}
