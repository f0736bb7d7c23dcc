use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{redirect, Client, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::HttpConfig;
use crate::error::{Result, ScanError};

/// The entry page as retrieved, after redirects.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub set_cookies: Vec<String>,
}

/// Build the shared client: browser identity, bounded redirects and the
/// per-request deadline. Compressed bodies are decoded transparently.
pub fn build_client(http: &HttpConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(http.user_agent.as_str())
        .default_headers(browser_headers())
        .redirect(redirect::Policy::limited(http.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true);
    if let Some(timeout) = http.timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ScanError::Config(format!("failed to build HTTP client: {e}")))
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        HeaderValue::from_static("1"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

/// GET the entry page. Any non-2xx status or transport failure is fatal.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ScanError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url = %url, status = status.as_u16(), "page fetch failed");
        return Err(upstream_status(url, status));
    }

    let final_url = response.url().clone();
    let set_cookies = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect();

    let body = response.text().await.map_err(|source| ScanError::Transport {
        url: url.to_string(),
        source,
    })?;
    debug!(url = %final_url, bytes = body.len(), "page fetched");

    Ok(FetchedPage {
        body,
        set_cookies,
    })
}

/// GET one script resource. The error string is the warning reason; a
/// failed script never aborts the scan.
pub async fn fetch_script(
    client: &Client,
    url: &Url,
    cookie_header: &str,
) -> std::result::Result<String, String> {
    let mut request = client.get(url.clone()).header(header::ACCEPT, "*/*");
    if !cookie_header.is_empty() {
        request = request.header(header::COOKIE, cookie_header);
    }

    let response = request.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(status_line(status));
    }
    response.text().await.map_err(|e| e.to_string())
}

fn upstream_status(url: &Url, status: StatusCode) -> ScanError {
    ScanError::UpstreamStatus {
        url: url.to_string(),
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
