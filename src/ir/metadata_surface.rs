use serde::{Deserialize, Serialize};

use super::RiskLevel;

/// Framework and endpoint metadata recovered from page and script text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanMetadata {
    pub fwuid: Option<String>,
    pub app: Option<String>,
    pub token: Option<String>,
    pub scanned_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub loaded_components: Vec<String>,
    pub detected_endpoints: Vec<DetectedEndpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aura_context: Option<AuraContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedEndpoint {
    pub path: String,
    #[serde(rename = "type")]
    pub endpoint_type: String,
    pub risk_level: RiskLevel,
    pub description: String,
}

/// The subset of the client-side Aura context that can be recovered from text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuraContext {
    pub mode: String,
    pub fwuid: String,
    pub app: String,
    pub loaded: std::collections::BTreeMap<String, String>,
    pub dn: Vec<String>,
    pub uad: bool,
}
