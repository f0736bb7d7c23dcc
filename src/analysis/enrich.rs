//! Action enrichment: knowledge-base lookup first, naming heuristics second.
//!
//! Never fails. Missing information degrades to `unknown` risk and the
//! `custom` category.

use crate::ir::{ActionCategory, ActionDescriptor, EnrichedAction, RiskLevel};
use crate::knowledge;
use crate::parser::params;

/// Action-name keywords → risk, checked top to bottom.
const RISK_KEYWORDS: &[(&[&str], RiskLevel)] = &[
    (&["delete", "remove"], RiskLevel::Critical),
    (&["update", "save", "create", "insert"], RiskLevel::High),
    (&["get", "fetch", "load", "read"], RiskLevel::Medium),
    (&["search", "find"], RiskLevel::Medium),
];

/// Controller-name keywords → category, checked top to bottom.
const CATEGORY_KEYWORDS: &[(&[&str], ActionCategory)] = &[
    (&["login", "auth"], ActionCategory::Auth),
    (&["cart", "commerce", "product"], ActionCategory::Commerce),
    (&["community", "site"], ActionCategory::Community),
    (&["record", "sobject"], ActionCategory::Record),
    (&["chat"], ActionCategory::Chat),
];

fn first_keyword_hit<T: Copy>(haystack: &str, table: &[(&[&str], T)]) -> Option<T> {
    let lower = haystack.to_lowercase();
    table
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map(|(_, value)| *value)
}

pub fn heuristic_risk(action_name: &str) -> RiskLevel {
    first_keyword_hit(action_name, RISK_KEYWORDS).unwrap_or(RiskLevel::Unknown)
}

pub fn heuristic_category(controller: &str) -> ActionCategory {
    first_keyword_hit(controller, CATEGORY_KEYWORDS).unwrap_or(ActionCategory::Custom)
}

/// Attach schema, category and risk to a bare descriptor.
///
/// `surrounding` is the text the descriptor was found in; it is only
/// consulted when the `(controller, action)` pair is not in the knowledge base.
pub fn enrich(descriptor: ActionDescriptor, surrounding: &str) -> EnrichedAction {
    if let Some((ctrl, known)) = knowledge::lookup(&descriptor.controller, &descriptor.name) {
        return EnrichedAction {
            action: descriptor,
            return_type: known.return_type.to_string(),
            parameters: known.parameters(),
            category: ctrl.category,
            risk_level: known.risk,
            description: known.description.to_string(),
            is_known: true,
            requires_auth: known.requires_auth,
            known_weaknesses: known.weaknesses.iter().map(|w| w.to_string()).collect(),
        };
    }

    let parameters = params::infer_best(surrounding, &descriptor.name);
    let risk_level = heuristic_risk(&descriptor.name);
    let category = heuristic_category(&descriptor.controller);
    let description = format!(
        "Custom Apex action: {}.{}",
        descriptor.controller, descriptor.name
    );

    EnrichedAction {
        action: descriptor,
        return_type: "Object".into(),
        parameters,
        category,
        risk_level,
        description,
        is_known: false,
        requires_auth: risk_level.implies_auth(),
        known_weaknesses: Vec::new(),
    }
}
