//! Curated knowledge of built-in Aura controllers and platform endpoints.
//!
//! Both tables are `'static` data; the lookup index is built once on first
//! use and shared read-only by every scan.

mod controllers;
pub mod endpoints;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::ir::{ActionCategory, ActionParameter, ParamProvenance, RiskLevel};

pub use endpoints::{KnownEndpoint, KNOWN_ENDPOINTS};

#[derive(Debug, Serialize)]
pub struct KnownParam {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: &'static str,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownAction {
    pub name: &'static str,
    pub params: &'static [KnownParam],
    pub return_type: &'static str,
    pub risk: RiskLevel,
    pub description: &'static str,
    pub requires_auth: bool,
    pub weaknesses: &'static [&'static str],
}

impl KnownAction {
    /// Parameter schema tagged as knowledge-base provenance.
    pub fn parameters(&self) -> Vec<ActionParameter> {
        self.params
            .iter()
            .map(|p| ActionParameter {
                name: p.name.to_string(),
                param_type: p.ty.to_string(),
                required: p.required,
                description: p.description.to_string(),
                provenance: ParamProvenance::Known,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct KnownController {
    pub name: &'static str,
    pub description: &'static str,
    pub category: ActionCategory,
    pub risk: RiskLevel,
    pub actions: &'static [KnownAction],
}

impl KnownController {
    pub fn action(&self, name: &str) -> Option<&'static KnownAction> {
        self.actions.iter().find(|a| a.name == name)
    }
}

static INDEX: Lazy<HashMap<&'static str, &'static KnownController>> = Lazy::new(|| {
    controllers::KNOWN_CONTROLLERS
        .iter()
        .map(|c| (c.name, c))
        .collect()
});

/// Every controller in the knowledge base, in catalog order.
pub fn controllers() -> &'static [KnownController] {
    controllers::KNOWN_CONTROLLERS
}

pub fn controller(name: &str) -> Option<&'static KnownController> {
    INDEX.get(name).copied()
}

/// Exact `(controller, action)` lookup. Names are case-sensitive, as the
/// framework treats them.
pub fn lookup(
    controller_name: &str,
    action: &str,
) -> Option<(&'static KnownController, &'static KnownAction)> {
    let ctrl = controller(controller_name)?;
    let known = ctrl.action(action)?;
    Some((ctrl, known))
}
