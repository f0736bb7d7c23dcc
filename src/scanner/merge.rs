//! Folding per-resource extraction results into one scan result.
//!
//! Every fold here is first-found-wins: values recovered from the page are
//! never replaced by values recovered later from scripts.

use std::collections::HashSet;

use crate::ir::{ActionKey, EnrichedAction, ScanMetadata};
use crate::rules::VulnerabilityFinding;

/// Insertion-ordered set of actions keyed by `(controller, name)`.
#[derive(Debug, Default)]
pub struct ActionSet {
    actions: Vec<EnrichedAction>,
    seen: HashSet<ActionKey>,
}

impl ActionSet {
    pub fn contains(&self, key: &ActionKey) -> bool {
        self.seen.contains(key)
    }

    /// Append `action` unless its identity is already present. Returns
    /// whether it was added.
    pub fn insert(&mut self, action: EnrichedAction) -> bool {
        if !self.seen.insert(action.key()) {
            return false;
        }
        self.actions.push(action);
        true
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut EnrichedAction> {
        self.actions.iter_mut()
    }

    pub fn into_vec(self) -> Vec<EnrichedAction> {
        self.actions
    }
}

/// Fill absent scalar fields from `other` and append unseen list entries.
/// `scanned_url` always stays with `base`.
pub fn merge_metadata(base: &mut ScanMetadata, other: ScanMetadata) {
    fill(&mut base.fwuid, other.fwuid);
    fill(&mut base.app, other.app);
    fill(&mut base.token, other.token);
    fill(&mut base.api_version, other.api_version);
    fill(&mut base.aura_context, other.aura_context);

    for component in other.loaded_components {
        if !base.loaded_components.contains(&component) {
            base.loaded_components.push(component);
        }
    }
    for endpoint in other.detected_endpoints {
        if !base.detected_endpoints.iter().any(|e| e.path == endpoint.path) {
            base.detected_endpoints.push(endpoint);
        }
    }
}

fn fill<T>(slot: &mut Option<T>, candidate: Option<T>) {
    if slot.is_none() {
        *slot = candidate;
    }
}

/// Fold findings by rule id: the first excerpt is kept, counts add up.
pub fn merge_findings(base: &mut Vec<VulnerabilityFinding>, other: Vec<VulnerabilityFinding>) {
    for finding in other {
        match base.iter_mut().find(|f| f.id == finding.id) {
            Some(existing) => existing.occurrence_count += finding.occurrence_count,
            None => base.push(finding),
        }
    }
}
