//! aurarecon: discovery and enrichment of Aura/Lightning RPC actions.
//!
//! Fetches a public Salesforce Experience Cloud page plus the scripts it
//! references, extracts every `ACTION$` descriptor, enriches each one from a
//! built-in knowledge base (or naming heuristics), and reports framework
//! metadata, guest-session cookies and insecure coding patterns.
//!
//! # Quick Start
//!
//! ```no_run
//! use aurarecon::{scan, ScanOptions};
//!
//! # async fn run() -> aurarecon::error::Result<()> {
//! let report = scan("https://site.example.com/s/", &ScanOptions::default()).await?;
//! println!("Actions: {}, Pass: {}", report.result.raw_matches, report.verdict.pass);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod ir;
pub mod knowledge;
pub mod output;
pub mod parser;
pub mod rules;
pub mod scanner;

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use config::{Config, CONFIG_FILE};
use error::Result;
use ir::ScanResult;
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use scanner::Scanner;

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.aurarecon.toml` in the working directory).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for fail_on threshold.
    pub fail_on_override: Option<rules::Severity>,
    /// CLI override for the per-request timeout.
    pub timeout_override: Option<u64>,
    /// CLI override for the script cap.
    pub max_scripts_override: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            fail_on_override: None,
            timeout_override: None,
            max_scripts_override: None,
        }
    }
}

impl ScanOptions {
    /// Load the config file and fold the CLI overrides into it.
    pub fn resolve_config(&self) -> Result<Config> {
        let path = self
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        let mut config = Config::load(&path)?;

        if let Some(fail_on) = self.fail_on_override {
            config.policy.fail_on = fail_on;
        }
        if let Some(timeout) = self.timeout_override {
            config.http.timeout_secs = timeout;
        }
        if let Some(max_scripts) = self.max_scripts_override {
            config.http.max_scripts = max_scripts;
        }
        Ok(config)
    }
}

/// Complete scan report: the scan result with policy applied to its findings.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub result: ScanResult,
    pub verdict: PolicyVerdict,
    pub scanned_at: DateTime<Utc>,
}

/// Run a complete scan: validate the target, fetch and extract, evaluate policy.
pub async fn scan(url: &str, options: &ScanOptions) -> Result<ScanReport> {
    let config = options.resolve_config()?;
    let target = scanner::parse_target(url)?;
    let scanner = Scanner::new(config.http.clone())?;

    let scanned_at = Utc::now();
    let mut result = scanner.scan(&target).await?;

    // Verdict is computed on raw findings; the report keeps only effective ones.
    let verdict = config.policy.evaluate(&result);
    result.vulnerabilities = config.policy.apply(std::mem::take(&mut result.vulnerabilities));

    Ok(ScanReport {
        result,
        verdict,
        scanned_at,
    })
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(report, format)
}
