use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{AuraContext, ScanMetadata};
use crate::knowledge::endpoints;

/// Ordered alternatives for one metadata field; the first pattern that
/// matches supplies the value and the rest are skipped.
pub struct FieldPatterns {
    patterns: Vec<Regex>,
}

impl FieldPatterns {
    fn new(sources: &[&str]) -> Self {
        Self {
            patterns: sources.iter().map(|s| Regex::new(s).unwrap()).collect(),
        }
    }

    pub fn first_match(&self, text: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
            .map(|m| m.as_str().to_string())
    }
}

pub static FWUID: Lazy<FieldPatterns> = Lazy::new(|| {
    FieldPatterns::new(&[r#""fwuid"\s*:\s*"([^"]+)""#, r#"\bfwuid\s*:\s*["']([^"']+)["']"#])
});

pub static APP: Lazy<FieldPatterns> = Lazy::new(|| {
    FieldPatterns::new(&[r#""app"\s*:\s*"([^"]+)""#, r#"\bapp\s*:\s*["']([^"']+)["']"#])
});

pub static TOKEN: Lazy<FieldPatterns> = Lazy::new(|| {
    FieldPatterns::new(&[
        r#"aura\.token\s*=\s*["']([^"']+)["']"#,
        r#""aura\.token"\s*:\s*"([^"]+)""#,
        r#"\btoken:\s*["']([^"']+)["']"#,
    ])
});

pub static API_VERSION: Lazy<FieldPatterns> =
    Lazy::new(|| FieldPatterns::new(&[r"/services/data/v(\d+\.\d+)", r"\bv(\d+\.\d+)\b"]));

static LOADED_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""loaded"\s*:\s*\{([^}]+)\}"#).unwrap());

static LOADED_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]+)"\s*:\s*(?:"([^"]*)")?"#).unwrap());

static CONTEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\{[^{}]*?"mode"\s*:\s*"([^"]+)"[^{}]*?"fwuid"\s*:\s*"([^"]+)"[^{}]*?"app"\s*:\s*"([^"]+)""#,
    )
    .unwrap()
});

static UAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""uad"\s*:\s*(true|false)"#).unwrap());

pub fn extract_fwuid(text: &str) -> Option<String> {
    FWUID.first_match(text)
}

pub fn extract_app(text: &str) -> Option<String> {
    APP.first_match(text)
}

pub fn extract_token(text: &str) -> Option<String> {
    TOKEN.first_match(text)
}

/// Component descriptors listed under the context's `"loaded"` map, with
/// their version hashes when present.
pub fn extract_loaded(text: &str) -> BTreeMap<String, String> {
    let mut loaded = BTreeMap::new();
    let Some(block) = LOADED_BLOCK_RE.captures(text).and_then(|c| c.get(1)) else {
        return loaded;
    };
    for cap in LOADED_KEY_RE.captures_iter(block.as_str()) {
        if let Some(key) = cap.get(1) {
            let value = cap.get(2).map(|v| v.as_str()).unwrap_or_default();
            loaded.insert(key.as_str().to_string(), value.to_string());
        }
    }
    loaded
}

fn loaded_names(text: &str) -> Vec<String> {
    let Some(block) = LOADED_BLOCK_RE.captures(text).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    LOADED_KEY_RE
        .captures_iter(block.as_str())
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn extract_aura_context(text: &str) -> Option<AuraContext> {
    let cap = CONTEXT_RE.captures(text)?;
    let uad = UAD_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .is_some_and(|m| m.as_str() == "true");
    Some(AuraContext {
        mode: cap.get(1)?.as_str().to_string(),
        fwuid: cap.get(2)?.as_str().to_string(),
        app: cap.get(3)?.as_str().to_string(),
        loaded: extract_loaded(text),
        dn: Vec::new(),
        uad,
    })
}

/// Recover framework metadata from one body of text.
pub fn extract_metadata(text: &str, url: &str) -> ScanMetadata {
    ScanMetadata {
        fwuid: extract_fwuid(text),
        app: extract_app(text),
        token: extract_token(text),
        scanned_url: url.to_string(),
        api_version: API_VERSION.first_match(text),
        loaded_components: loaded_names(text),
        detected_endpoints: endpoints::detect(text),
        aura_context: extract_aura_context(text),
    }
}
