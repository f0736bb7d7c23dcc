use once_cell::sync::Lazy;
use regex::Regex;

use super::PatternRule;
use crate::rules::{Severity, VulnCategory};

static WILDCARD_TARGET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"postMessage\s*\([^;]*?,\s*["']\*["']\s*\)"#).unwrap());

static MESSAGE_LISTENER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"addEventListener\s*\(\s*["']message["']"#).unwrap());

static ORIGIN_CHECK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.origin\b").unwrap());

/// Bytes after a listener registration searched for an origin check.
const ORIGIN_CHECK_WINDOW: usize = 400;

/// AURA-001: messages posted to any origin.
pub(super) fn wildcard_post_message() -> PatternRule {
    PatternRule {
        id: "AURA-001",
        name: "Wildcard postMessage target origin",
        description: "postMessage is called with \"*\" as target origin, so any embedding \
                      frame can read the message",
        severity: Severity::High,
        category: VulnCategory::Messaging,
        recommendation: "Pass the exact expected origin as the second argument to postMessage.",
        cwe_id: Some("CWE-201"),
        pattern: &WILDCARD_TARGET_RE,
        unless_followed_by: None,
    }
}

/// AURA-002: message handlers that never look at `event.origin`.
pub(super) fn unchecked_message_listener() -> PatternRule {
    PatternRule {
        id: "AURA-002",
        name: "Message listener without origin check",
        description: "A window message listener is registered without verifying the sender origin",
        severity: Severity::Medium,
        category: VulnCategory::Messaging,
        recommendation: "Compare event.origin against an allowlist before acting on the message.",
        cwe_id: Some("CWE-346"),
        pattern: &MESSAGE_LISTENER_RE,
        unless_followed_by: Some((&ORIGIN_CHECK_RE, ORIGIN_CHECK_WINDOW)),
    }
}
