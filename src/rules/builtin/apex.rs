use once_cell::sync::Lazy;
use regex::Regex;

use super::PatternRule;
use crate::rules::{Severity, VulnCategory};

static WITHOUT_SHARING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bwithout\s+sharing\b").unwrap());

static SOQL_CONCAT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:Database\.query\s*\(\s*)?['"]\s*SELECT\s[^'"]*['"]\s*\+"#).unwrap()
});

/// AURA-003
pub(super) fn without_sharing() -> PatternRule {
    PatternRule {
        id: "AURA-003",
        name: "Apex class declared without sharing",
        description: "Apex code runs in system mode and ignores the caller's record-level access",
        severity: Severity::High,
        category: VulnCategory::Apex,
        recommendation: "Declare controllers `with sharing` (or `inherited sharing`) and \
                         enforce CRUD/FLS checks explicitly.",
        cwe_id: Some("CWE-284"),
        pattern: &WITHOUT_SHARING_RE,
        unless_followed_by: None,
    }
}

/// AURA-005
pub(super) fn dynamic_soql() -> PatternRule {
    PatternRule {
        id: "AURA-005",
        name: "Dynamic SOQL built by string concatenation",
        description: "A SOQL query string is concatenated with runtime values",
        severity: Severity::High,
        category: VulnCategory::Injection,
        recommendation: "Use bind variables (:var) or String.escapeSingleQuotes on every \
                         concatenated value.",
        cwe_id: Some("CWE-943"),
        pattern: &SOQL_CONCAT_RE,
        unless_followed_by: None,
    }
}
