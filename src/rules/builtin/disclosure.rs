use once_cell::sync::Lazy;
use regex::Regex;

use super::PatternRule;
use crate::rules::{Severity, VulnCategory};

static SESSION_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{!\s*\$Api\.Session_ID\s*\}|UserInfo\.getSessionId\s*\(\s*\)").unwrap()
});

// Org id prefix, '!', then the opaque session secret.
static SESSION_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b00D[A-Za-z0-9]{12,15}![A-Za-z0-9._]{20,}").unwrap());

/// AURA-004
pub(super) fn session_id_exposed() -> PatternRule {
    PatternRule {
        id: "AURA-004",
        name: "Session id exposed to client",
        description: "Server code hands the current user's API session id to client-side code",
        severity: Severity::Critical,
        category: VulnCategory::CredentialExposure,
        recommendation: "Never expose session ids to the browser; use Named Credentials or \
                         server-side callouts.",
        cwe_id: Some("CWE-200"),
        pattern: &SESSION_ID_RE,
        unless_followed_by: None,
    }
}

/// AURA-006
pub(super) fn session_token_literal() -> PatternRule {
    PatternRule {
        id: "AURA-006",
        name: "Salesforce session token literal",
        description: "Retrieved content contains a string shaped like a live Salesforce session id",
        severity: Severity::Critical,
        category: VulnCategory::CredentialExposure,
        recommendation: "Revoke the session and remove hard-coded or rendered tokens from \
                         public resources.",
        cwe_id: Some("CWE-798"),
        pattern: &SESSION_TOKEN_RE,
        unless_followed_by: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Detector;

    #[test]
    fn flags_visualforce_merge_field_and_apex_call() {
        let text = "var sid = '{!$Api.Session_ID}'; String s = UserInfo.getSessionId();";
        let f = session_id_exposed().detect(text).unwrap();
        assert_eq!(f.occurrence_count, 2);
        assert_eq!(f.matched_excerpt, "{!$Api.Session_ID}");
    }

    #[test]
    fn flags_token_shape() {
        let text = "auth: '00D5g000004XyZaEAK!ARkAQKx9dP2mQz7f8Hn0vL.kTq3sWbY'";
        let f = session_token_literal().detect(text).unwrap();
        assert_eq!(f.severity, Severity::Critical);
        assert!(f.matched_excerpt.starts_with("00D5g000004XyZa"));
    }

    #[test]
    fn short_ids_are_not_tokens() {
        assert!(session_token_literal().detect("sid=00Dxx!AQ").is_none());
        assert!(session_token_literal()
            .detect("OrganizationId: 00D5g000004XyZaEAK")
            .is_none());
    }
}
