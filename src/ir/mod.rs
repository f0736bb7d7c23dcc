//! Data model shared by the extractors, the enricher and the orchestrator.
//!
//! Extractors produce these records from raw text; the orchestrator folds
//! them into a single `ScanResult`. Output renderers only ever read them.

pub mod action_surface;
pub mod metadata_surface;
pub mod session_surface;

use serde::{Deserialize, Serialize};

pub use action_surface::{
    ActionCategory, ActionDescriptor, ActionKey, ActionParameter, DescriptorSyntax,
    EnrichedAction, ParamProvenance,
};
pub use metadata_surface::{AuraContext, DetectedEndpoint, ScanMetadata};
pub use session_surface::{GuestSession, SessionCookie, SessionType};

use crate::rules::VulnerabilityFinding;

/// Risk of invoking an action (or exposing an endpoint) as an outsider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// High and critical actions are assumed to sit behind authentication.
    pub fn implies_auth(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unknown" => Some(Self::Unknown),
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Consolidated outcome of one successful scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub success: bool,
    /// Always equal to `controllers.len()`.
    pub raw_matches: usize,
    pub controllers: Vec<EnrichedAction>,
    pub metadata: ScanMetadata,
    pub guest_session: GuestSession,
    pub vulnerabilities: Vec<VulnerabilityFinding>,
    pub js_files_scanned: usize,
    /// Bytes of the initial page body.
    pub page_size: usize,
    /// Milliseconds from the start of the page fetch.
    pub scan_duration: u64,
    pub warnings: Vec<String>,
}

impl ScanResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        controllers: Vec<EnrichedAction>,
        metadata: ScanMetadata,
        guest_session: GuestSession,
        vulnerabilities: Vec<VulnerabilityFinding>,
        js_files_scanned: usize,
        page_size: usize,
        scan_duration: u64,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            success: true,
            raw_matches: controllers.len(),
            controllers,
            metadata,
            guest_session,
            vulnerabilities,
            js_files_scanned,
            page_size,
            scan_duration,
            warnings,
        }
    }

    pub fn highest_action_risk(&self) -> Option<RiskLevel> {
        self.controllers.iter().map(|a| a.risk_level).max()
    }
}
