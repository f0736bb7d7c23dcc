use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{GuestSession, SessionCookie, SessionType};

/// Text markers of an unauthenticated session, tried in order.
static GUEST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)guest").unwrap(),
        Regex::new(r"(?i)unauthenticated").unwrap(),
        Regex::new(r#""isGuest"\s*:\s*true"#).unwrap(),
        Regex::new(r#""userType"\s*:\s*"Guest""#).unwrap(),
    ]
});

const SESSION_ID_COOKIE: &str = "sid";
const ORG_ID_COOKIE: &str = "oid";

/// Parse one `Set-Cookie` line. Lines without a `name=value` pair are
/// dropped.
pub fn parse_set_cookie(line: &str) -> Option<SessionCookie> {
    let mut segments = line.split(';').map(str::trim);
    let (name, value) = segments.next()?.split_once('=')?;
    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        return None;
    }

    let mut cookie = SessionCookie {
        name: name.to_string(),
        value: value.to_string(),
        domain: String::new(),
        path: "/".into(),
        secure: false,
        http_only: false,
    };

    for attr in segments {
        let (key, val) = match attr.split_once('=') {
            Some((k, v)) => (k.trim(), Some(v.trim())),
            None => (attr, None),
        };
        match key.to_ascii_lowercase().as_str() {
            "domain" => cookie.domain = val.unwrap_or_default().to_string(),
            "path" => cookie.path = val.filter(|v| !v.is_empty()).unwrap_or("/").to_string(),
            "secure" => cookie.secure = true,
            "httponly" => cookie.http_only = true,
            _ => {}
        }
    }

    Some(cookie)
}

pub fn parse_cookies<I, S>(lines: I) -> Vec<SessionCookie>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| parse_set_cookie(line.as_ref()))
        .collect()
}

pub fn raw_cookie_header(cookies: &[SessionCookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Authenticated needs both session and org cookies; otherwise any guest
/// marker in the text, or any cookie at all, means a guest session.
pub fn classify_session(cookies: &[SessionCookie], text: &str) -> SessionType {
    let has = |name: &str| cookies.iter().any(|c| c.name.eq_ignore_ascii_case(name));
    if has(SESSION_ID_COOKIE) && has(ORG_ID_COOKIE) {
        return SessionType::Authenticated;
    }
    if GUEST_PATTERNS.iter().any(|re| re.is_match(text)) || !cookies.is_empty() {
        return SessionType::Guest;
    }
    SessionType::Unknown
}

pub fn extract_session<I, S>(set_cookie_lines: I, text: &str) -> GuestSession
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cookies = parse_cookies(set_cookie_lines);
    GuestSession {
        raw_header: raw_cookie_header(&cookies),
        session_type: classify_session(&cookies, text),
        cookies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_attributes_case_insensitively() {
        let line = "sid=00Dxx!AQ; Domain=.example.com; PATH=/s; SECURE; HttpOnly";
        let cookie = parse_set_cookie(line).unwrap();
        assert_eq!(
            cookie,
            SessionCookie {
                name: "sid".into(),
                value: "00Dxx!AQ".into(),
                domain: ".example.com".into(),
                path: "/s".into(),
                secure: true,
                http_only: true,
            }
        );
    }

    #[test]
    fn value_keeps_embedded_equals() {
        let cookie = parse_set_cookie("renderCtx=a%3Db=c; path=/").unwrap();
        assert_eq!(cookie.value, "a%3Db=c");
    }

    #[test]
    fn defaults_when_no_attributes() {
        let cookie = parse_set_cookie("CookieConsentPolicy=0:1").unwrap();
        assert_eq!(cookie.domain, "");
        assert_eq!(cookie.path, "/");
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
    }

    #[test]
    fn discards_lines_without_pair() {
        assert!(parse_set_cookie("garbage; Secure").is_none());
        assert!(parse_set_cookie("").is_none());
        assert!(parse_set_cookie("=value").is_none());
        let cookies = parse_cookies(["garbage", "a=1", "b=2; HttpOnly"]);
        assert_eq!(cookies.len(), 2);
        assert_eq!(raw_cookie_header(&cookies), "a=1; b=2");
    }

    #[test]
    fn session_classification() {
        let auth = parse_cookies(["sid=1", "OID=2"]);
        assert_eq!(classify_session(&auth, "guest"), SessionType::Authenticated);

        let only_sid = parse_cookies(["sid=1"]);
        assert_eq!(classify_session(&only_sid, ""), SessionType::Guest);

        assert_eq!(classify_session(&[], r#"{"isGuest":true}"#), SessionType::Guest);
        assert_eq!(classify_session(&[], "Unauthenticated user"), SessionType::Guest);
        assert_eq!(classify_session(&[], "nothing to see"), SessionType::Unknown);
    }

    #[test]
    fn builds_guest_session() {
        let session = extract_session(vec!["BrowserId=xyz; Secure".to_string()], "<html/>");
        assert_eq!(session.cookies.len(), 1);
        assert_eq!(session.raw_header, "BrowserId=xyz");
        assert_eq!(session.session_type, SessionType::Guest);
    }
}
