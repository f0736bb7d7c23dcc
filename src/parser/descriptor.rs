use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::ir::{ActionDescriptor, DescriptorSyntax};

/// One recognizable descriptor form: a compiled matcher plus the mapper that
/// turns a match into `(controller, action)`.
pub struct DescriptorPattern {
    pub syntax: DescriptorSyntax,
    pub regex: Regex,
    map: fn(&Captures) -> Option<(String, String)>,
}

static AURA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"aura://([\w.:-]+)/ACTION\$([A-Za-z0-9_]+)").unwrap());

static APEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"apex://([\w.:-]+)/ACTION\$([A-Za-z0-9_]+)").unwrap());

static SERVICE_COMPONENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"serviceComponent://ui\.([A-Za-z0-9_.]+)(?:/ACTION\$([A-Za-z0-9_]+))?").unwrap()
});

static PATTERNS: Lazy<Vec<DescriptorPattern>> = Lazy::new(|| {
    vec![
        DescriptorPattern {
            syntax: DescriptorSyntax::Aura,
            regex: AURA_RE.clone(),
            map: scheme_pair,
        },
        DescriptorPattern {
            syntax: DescriptorSyntax::Apex,
            regex: APEX_RE.clone(),
            map: scheme_pair,
        },
        DescriptorPattern {
            syntax: DescriptorSyntax::ServiceComponent,
            regex: SERVICE_COMPONENT_RE.clone(),
            map: service_component_pair,
        },
    ]
});

fn scheme_pair(cap: &Captures) -> Option<(String, String)> {
    let controller = cap.get(1)?.as_str();
    let action = cap.get(2)?.as_str();
    Some((controller.to_string(), action.to_string()))
}

/// `ui.<ns>.<Controller>/ACTION$<name>` names the last dotted segment as the
/// controller; the bare dotted form `ui.<controller>.<name>` splits on the
/// final dot.
fn service_component_pair(cap: &Captures) -> Option<(String, String)> {
    let path = cap.get(1)?.as_str().trim_end_matches('.');
    match cap.get(2) {
        Some(action) => {
            let controller = path.rsplit('.').next()?;
            if controller.is_empty() {
                return None;
            }
            Some((controller.to_string(), action.as_str().to_string()))
        }
        None => {
            let (head, action) = path.rsplit_once('.')?;
            let controller = head.rsplit('.').next()?;
            if controller.is_empty() || action.is_empty() {
                return None;
            }
            Some((controller.to_string(), action.to_string()))
        }
    }
}

/// All descriptor forms, in declaration order.
pub fn patterns() -> &'static [DescriptorPattern] {
    &PATTERNS
}

/// Scan text for every distinct action descriptor.
///
/// Results are ordered by the position of each action's first occurrence and
/// deduplicated on `(controller, action)` regardless of which form matched.
pub fn extract(text: &str) -> Vec<ActionDescriptor> {
    let mut hits: Vec<(usize, ActionDescriptor)> = Vec::new();

    for pattern in patterns() {
        for cap in pattern.regex.captures_iter(text) {
            let Some((controller, action)) = (pattern.map)(&cap) else {
                continue;
            };
            let Some(whole) = cap.get(0) else {
                continue;
            };
            hits.push((
                whole.start(),
                ActionDescriptor {
                    controller,
                    name: action,
                    raw: whole.as_str().to_string(),
                    syntax: pattern.syntax,
                },
            ));
        }
    }

    // Stable: equal offsets keep pattern declaration order.
    hits.sort_by_key(|(offset, _)| *offset);

    let mut seen = HashSet::new();
    hits.into_iter()
        .filter_map(|(_, d)| seen.insert(d.key()).then_some(d))
        .collect()
}
