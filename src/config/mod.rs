use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};
use crate::rules::policy::Policy;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = ".aurarecon.toml";

/// Hard ceiling on script resources per scan.
pub const MAX_SCRIPTS_CAP: usize = 15;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                  (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Top-level configuration from `.aurarecon.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub policy: Policy,
}

/// Network budget for one scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request deadline in seconds; 0 disables it.
    pub timeout_secs: u64,
    /// Script resources fetched per scan, after de-duplication.
    pub max_scripts: usize,
    /// Script fetches in flight at once.
    pub max_concurrency: usize,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            max_scripts: MAX_SCRIPTS_CAP,
            max_concurrency: 15,
            user_agent: DEFAULT_USER_AGENT.into(),
            max_redirects: 10,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_scripts > MAX_SCRIPTS_CAP {
            return Err(ScanError::Config(format!(
                "http.max_scripts must be at most {MAX_SCRIPTS_CAP}, got {}",
                self.max_scripts
            )));
        }
        if self.max_concurrency == 0 {
            return Err(ScanError::Config(
                "http.max_concurrency must be at least 1".into(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScanError::Config("http.user_agent must not be empty".into()));
        }
        Ok(())
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.http.validate()?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# aurarecon configuration

[http]
# Per-request deadline in seconds (0 disables).
timeout_secs = 20
# Script resources fetched per scan.
max_scripts = 15
# Script fetches in flight at once.
max_concurrency = 15
max_redirects = 10
# user_agent = "Mozilla/5.0 ..."

[policy]
# Minimum severity to fail the scan (info, low, medium, high, critical).
fail_on = "high"

# Also fail when an action at or above this risk is discovered
# (unknown, low, medium, high, critical). Unset disables the check.
# fail_on_action_risk = "critical"

# Rule IDs to ignore entirely.
# ignore_rules = ["AURA-007"]

# Actions the risk check skips, as Controller.action.
# ignore_actions = ["RecordUiController.deleteRecord"]

# Per-rule severity overrides.
# [policy.overrides]
# "AURA-002" = "low"
"#
    }
}
