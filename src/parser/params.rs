//! Parameter inference for actions the knowledge base does not cover.
//!
//! Two sources are consulted, both purely textual:
//!
//! - **signature**: an `@AuraEnabled` Apex method declaration whose name
//!   matches the action, which gives declared types.
//! - **context**: a `setParams({...})` call shortly after a mention of the
//!   action name, whose value expressions are typed by an ordered rule table.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::ir::{ActionParameter, ParamProvenance};

/// How far past an action-name mention a `setParams` call may start.
pub const CONTEXT_WINDOW: usize = 1000;

static SET_PARAMS_OPEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bsetParams?\s*\(\s*\{").unwrap());

static SET_PARAMS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^setParams?\s*\(\s*\{([^}]+)\}").unwrap());

static PARAM_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']?(\w+)["']?\s*:\s*([^,}]+)"#).unwrap());

static DECIMAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+$").unwrap());

static APEX_SIGNATURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)@AuraEnabled(?:\s*\([^)]*\))?\s+(?:(?:public|global|static|private|protected|override|virtual)\s+)+[\w.<>,\[\] ]+?\s+(\w+)\s*\(([^)]*)\)",
    )
    .unwrap()
});

/// One value-typing rule. The first rule whose predicate holds wins.
struct TypeRule {
    ty: &'static str,
    matches: fn(name: &str, value: &str) -> bool,
}

static TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        ty: "Boolean",
        matches: |_, v| v == "true" || v == "false",
    },
    TypeRule {
        ty: "Integer",
        matches: |_, v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()),
    },
    TypeRule {
        ty: "Decimal",
        matches: |_, v| DECIMAL_RE.is_match(v),
    },
    TypeRule {
        ty: "String",
        matches: |_, v| is_quoted(v),
    },
    TypeRule {
        ty: "List<Object>",
        matches: |_, v| v.starts_with('['),
    },
    TypeRule {
        ty: "Map<String, Object>",
        matches: |_, v| v.starts_with('{'),
    },
    TypeRule {
        ty: "Id",
        matches: |name, v| {
            let value = v.to_ascii_lowercase();
            name.ends_with("Id") || value.contains("recordid") || value.ends_with("id")
        },
    },
];

const FALLBACK_TYPE: &str = "Object";

fn is_quoted(v: &str) -> bool {
    v.len() >= 2
        && (v.starts_with('"') || v.starts_with('\''))
        && (v.ends_with('"') || v.ends_with('\''))
}

/// Coarse type of a parameter value expression.
pub fn infer_type(name: &str, value: &str) -> &'static str {
    let value = value.trim();
    TYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(name, value))
        .map(|rule| rule.ty)
        .unwrap_or(FALLBACK_TYPE)
}

/// Reconstruct parameters from `setParams` calls near mentions of `action_name`.
///
/// Returns an empty list when no call is found; that is not an error.
pub fn infer_parameters(text: &str, action_name: &str) -> Vec<ActionParameter> {
    let mut params = Vec::new();
    if action_name.is_empty() {
        return params;
    }

    let needle = match RegexBuilder::new(&regex::escape(action_name))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return params,
    };

    let mut seen = HashSet::new();
    let mut resume_at = 0;

    for mention in needle.find_iter(text) {
        if mention.start() < resume_at {
            continue;
        }
        let tail = &text[mention.end()..];
        let head = &tail[..floor_char_boundary(tail, CONTEXT_WINDOW + 64)];

        // First opener inside the window whose object body parses; an empty
        // `setParams({})` does not end the search.
        let parsed = SET_PARAMS_OPEN_RE
            .find_iter(head)
            .take_while(|open| open.start() <= CONTEXT_WINDOW)
            .find_map(|open| {
                let call = SET_PARAMS_RE.captures(&tail[open.start()..])?;
                Some((open.start(), call.get(0)?.end(), call.get(1)?))
            });
        let Some((open_at, call_len, body)) = parsed else {
            continue;
        };
        resume_at = mention.end() + open_at + call_len;

        for pair in PARAM_KEY_RE.captures_iter(body.as_str()) {
            let (Some(name), Some(value)) = (pair.get(1), pair.get(2)) else {
                continue;
            };
            let name = name.as_str();
            if seen.insert(name.to_string()) {
                params.push(ActionParameter {
                    name: name.to_string(),
                    param_type: infer_type(name, value.as_str()).to_string(),
                    required: true,
                    description: "Inferred from parameter object".into(),
                    provenance: ParamProvenance::Context,
                });
            }
        }
    }

    params
}

/// Read parameters from an `@AuraEnabled` method declared with the action's name.
pub fn infer_from_signature(text: &str, action_name: &str) -> Vec<ActionParameter> {
    let Some(cap) = APEX_SIGNATURE_RE
        .captures_iter(text)
        .find(|c| c.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case(action_name)))
    else {
        return Vec::new();
    };
    let Some(list) = cap.get(2) else {
        return Vec::new();
    };

    split_formal_params(list.as_str())
        .into_iter()
        .filter_map(|formal| {
            let formal = formal.trim().trim_start_matches("final ").trim();
            let (ty, name) = formal.rsplit_once(char::is_whitespace)?;
            let (ty, name) = (ty.trim(), name.trim());
            if ty.is_empty() || name.is_empty() {
                return None;
            }
            Some(ActionParameter {
                name: name.to_string(),
                param_type: ty.to_string(),
                required: true,
                description: "Declared in Apex method signature".into(),
                provenance: ParamProvenance::Signature,
            })
        })
        .collect()
}

/// Best available inference: a declared signature beats a usage site.
pub fn infer_best(text: &str, action_name: &str) -> Vec<ActionParameter> {
    let declared = infer_from_signature(text, action_name);
    if !declared.is_empty() {
        return declared;
    }
    infer_parameters(text, action_name)
}

/// Split `Map<String, Object> a, Id b` on top-level commas only.
fn split_formal_params(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in list.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if !list[start..].trim().is_empty() {
        parts.push(&list[start..]);
    }
    parts
}

pub(crate) fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
