use serde::{Deserialize, Serialize};

/// One insecure-practice pattern observed in retrieved content.
///
/// A scan reports at most one finding per rule id; repeated matches only
/// raise `occurrence_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityFinding {
    /// Rule identifier (e.g., "AURA-001").
    pub id: String,
    pub name: String,
    pub description: String,
    pub severity: Severity,
    pub category: VulnCategory,
    /// Text of the first match, truncated.
    pub matched_excerpt: String,
    pub recommendation: String,
    pub occurrence_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" => Some(Self::Info),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VulnCategory {
    Messaging,
    Apex,
    CredentialExposure,
    Injection,
    Xss,
}

impl std::fmt::Display for VulnCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Messaging => write!(f, "Cross-Origin Messaging"),
            Self::Apex => write!(f, "Apex Sharing"),
            Self::CredentialExposure => write!(f, "Credential Exposure"),
            Self::Injection => write!(f, "Injection"),
            Self::Xss => write!(f, "XSS"),
        }
    }
}

/// Metadata about a detector rule, used for `list-rules` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub default_severity: Severity,
    pub category: VulnCategory,
    pub cwe_id: Option<String>,
}
