use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static SCRIPT_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<script[^>]+src=["']([^"']+\.js[^"']*)["']"#).unwrap());

/// Script resources referenced by the page, resolved against `base`, in
/// document order, de-duplicated and capped at `max`.
///
/// References that do not resolve to an http(s) URL are dropped.
pub fn discover_scripts(html: &str, base: &Url, max: usize) -> Vec<Url> {
    let mut seen = HashSet::new();
    SCRIPT_SRC_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .filter_map(|src| base.join(src.as_str().trim()).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .filter(|url| seen.insert(url.as_str().to_string()))
        .take(max)
        .collect()
}
