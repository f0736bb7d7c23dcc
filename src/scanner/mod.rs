//! Scan orchestration: one page fetch, concurrent script fetches, merge.
//!
//! The script stage is a scatter/gather. Each fetch writes only its own
//! slot; the orchestrator folds the slots in discovery order once every
//! fetch has settled.

pub mod fetch;
pub mod merge;
pub mod scripts;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use crate::analysis::enrich;
use crate::config::HttpConfig;
use crate::error::{Result, ScanError};
use crate::ir::ScanResult;
use crate::parser::{self, cookies, params};
use crate::rules::RuleEngine;

use merge::ActionSet;

/// Orchestrator states, in the order a successful scan passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Fetching,
    Extracting,
    DiscoveringScripts,
    FetchingScripts,
    MergingResults,
    Done,
    Failed,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::DiscoveringScripts => "discovering_scripts",
            Self::FetchingScripts => "fetching_scripts",
            Self::MergingResults => "merging_results",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Phase tracker for one scan; owns the clock the duration is measured by.
struct ScanRun {
    phase: ScanPhase,
    started: Instant,
}

impl ScanRun {
    fn start() -> Self {
        let mut run = Self {
            phase: ScanPhase::Idle,
            started: Instant::now(),
        };
        run.enter(ScanPhase::Fetching);
        run
    }

    fn enter(&mut self, next: ScanPhase) {
        debug!(from = %self.phase, phase = %next, "scan phase");
        self.phase = next;
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Outcome of one script fetch.
#[derive(Debug)]
struct ScriptSlot {
    url: Url,
    body: std::result::Result<String, String>,
}

/// Parse and validate a scan target. Only absolute http(s) URLs are scanned.
pub fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|_| ScanError::InvalidInput("Invalid URL format".into()))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(ScanError::InvalidInput("Invalid URL format".into())),
    }
}

/// Runs scans. Cheap to clone; clones share the connection pool and the
/// rule catalog.
#[derive(Clone)]
pub struct Scanner {
    client: Client,
    http: HttpConfig,
    rules: Arc<RuleEngine>,
}

impl Scanner {
    pub fn new(http: HttpConfig) -> Result<Self> {
        http.validate()?;
        Ok(Self {
            client: fetch::build_client(&http)?,
            http,
            rules: Arc::new(RuleEngine::new()),
        })
    }

    /// Scan one entry page and the scripts it references.
    ///
    /// Only the page fetch can fail the scan; script failures become
    /// warnings on the result.
    pub async fn scan(&self, target: &Url) -> Result<ScanResult> {
        let mut run = ScanRun::start();
        info!(url = %target, "starting scan");

        let page = match fetch::fetch_page(&self.client, target).await {
            Ok(page) => page,
            Err(e) => {
                run.enter(ScanPhase::Failed);
                return Err(e);
            }
        };
        let html = page.body;
        let page_size = html.len();

        run.enter(ScanPhase::Extracting);
        let parsed = parser::parse_content(&html, target.as_str());
        let guest_session = cookies::extract_session(&page.set_cookies, &html);
        let mut actions = ActionSet::default();
        for descriptor in parsed.descriptors {
            actions.insert(enrich(descriptor, &html));
        }
        let mut metadata = parsed.metadata;
        let mut vulnerabilities = self.rules.detect(&html);
        debug!(
            actions = actions.len(),
            cookies = guest_session.cookies.len(),
            "page extracted"
        );

        run.enter(ScanPhase::DiscoveringScripts);
        let script_urls = scripts::discover_scripts(&html, target, self.http.max_scripts);
        let js_files_scanned = script_urls.len();
        debug!(scripts = js_files_scanned, "scripts discovered");

        run.enter(ScanPhase::FetchingScripts);
        let slots = self
            .fetch_scripts(script_urls, &guest_session.raw_header)
            .await;

        run.enter(ScanPhase::MergingResults);
        let mut warnings = Vec::new();
        let mut bodies = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot.body {
                Ok(body) => bodies.push((slot.url, body)),
                Err(reason) => {
                    warn!(url = %slot.url, %reason, "script fetch failed");
                    warnings.push(format!("Failed to fetch script {}: {}", slot.url, reason));
                }
            }
        }

        for (url, body) in bodies.iter().filter(|(_, b)| !b.is_empty()) {
            let script = parser::parse_content(body, url.as_str());
            for descriptor in script.descriptors {
                if !actions.contains(&descriptor.key()) {
                    actions.insert(enrich(descriptor, body));
                }
            }
            merge::merge_metadata(&mut metadata, script.metadata);
            merge::merge_findings(&mut vulnerabilities, self.rules.detect(body));
        }

        // Unknown actions still without parameters get one more try with
        // every retrieved body as context.
        let all_content = std::iter::once(html.as_str())
            .chain(bodies.iter().map(|(_, b)| b.as_str()))
            .collect::<Vec<_>>()
            .join("\n");
        for action in actions
            .iter_mut()
            .filter(|a| !a.is_known && a.parameters.is_empty())
        {
            action.parameters = params::infer_best(&all_content, &action.action.name);
        }

        run.enter(ScanPhase::Done);
        let result = ScanResult::new(
            actions.into_vec(),
            metadata,
            guest_session,
            vulnerabilities,
            js_files_scanned,
            page_size,
            run.elapsed_ms(),
            warnings,
        );
        info!(
            url = %target,
            actions = result.raw_matches,
            findings = result.vulnerabilities.len(),
            warnings = result.warnings.len(),
            duration_ms = result.scan_duration,
            "scan complete"
        );
        Ok(result)
    }

    async fn fetch_scripts(&self, urls: Vec<Url>, cookie_header: &str) -> Vec<ScriptSlot> {
        stream::iter(urls)
            .map(|url| {
                let client = self.client.clone();
                async move {
                    let body = fetch::fetch_script(&client, &url, cookie_header).await;
                    ScriptSlot { url, body }
                }
            })
            .buffered(self.http.max_concurrency.max(1))
            .collect()
            .await
    }
}
