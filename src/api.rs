//! Request/response boundary: `{ url }` in, the JSON envelope out.
//!
//! Transport-agnostic. A host (HTTP handler, CLI, test) supplies the parsed
//! request and writes `ApiResponse::body` with `ApiResponse::status`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{Result, ScanError};
use crate::ir::ScanResult;
use crate::scanner::{self, Scanner};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ScanRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| ScanError::InvalidInput(format!("Invalid request body: {e}")))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_duration: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Ok(Box<ScanResult>),
    Err(ErrorBody),
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    fn ok(result: ScanResult) -> Self {
        Self {
            status: 200,
            body: ResponseBody::Ok(Box::new(result)),
        }
    }

    fn failure(status: u16, error: impl Into<String>, scan_duration: Option<u64>) -> Self {
        Self {
            status,
            body: ResponseBody::Err(ErrorBody {
                success: false,
                error: error.into(),
                scan_duration,
            }),
        }
    }

    pub fn from_error(err: &ScanError, scan_duration: Option<u64>) -> Self {
        Self::failure(err.http_status(), err.to_string(), scan_duration)
    }

    pub fn is_success(&self) -> bool {
        matches!(self.body, ResponseBody::Ok(_))
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match &self.body {
            ResponseBody::Ok(result) => Some(result.as_ref()),
            ResponseBody::Err(_) => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.body)?)
    }
}

/// Validate the request, run the scan and wrap the outcome in the envelope.
///
/// Input errors return before any network I/O. The scan itself runs on a
/// separate task so that a panic surfaces as a 500 instead of unwinding
/// into the caller.
pub async fn handle(request: ScanRequest, scanner: &Scanner) -> ApiResponse {
    let started = Instant::now();

    let Some(raw) = request.url.filter(|u| !u.trim().is_empty()) else {
        return ApiResponse::failure(400, "URL is required", None);
    };
    let target = match scanner::parse_target(&raw) {
        Ok(url) => url,
        Err(e) => return ApiResponse::from_error(&e, None),
    };

    let task_scanner = scanner.clone();
    let joined = tokio::spawn(async move { task_scanner.scan(&target).await }).await;
    let elapsed = started.elapsed().as_millis() as u64;

    match joined {
        Ok(Ok(result)) => ApiResponse::ok(result),
        Ok(Err(e)) => {
            warn!(url = %raw, error = %e, "scan failed");
            ApiResponse::from_error(&e, Some(elapsed))
        }
        Err(join_error) => {
            error!(url = %raw, error = %join_error, "scan task aborted");
            ApiResponse::from_error(
                &ScanError::Internal("scan task aborted unexpectedly".into()),
                Some(elapsed),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    fn scanner() -> Scanner {
        Scanner::new(HttpConfig::default()).unwrap()
    }

    fn error_of(response: &ApiResponse) -> &ErrorBody {
        match &response.body {
            ResponseBody::Err(body) => body,
            ResponseBody::Ok(_) => panic!("expected an error body"),
        }
    }

    #[tokio::test]
    async fn missing_url_is_400() {
        let response = handle(ScanRequest::default(), &scanner()).await;
        assert_eq!(response.status, 400);
        assert_eq!(error_of(&response).error, "URL is required");
        assert!(!response.is_success());

        let blank = handle(ScanRequest::new("   "), &scanner()).await;
        assert_eq!(blank.status, 400);
        assert_eq!(error_of(&blank).error, "URL is required");
    }

    #[tokio::test]
    async fn malformed_url_is_400() {
        let response = handle(ScanRequest::new("not a url"), &scanner()).await;
        assert_eq!(response.status, 400);
        assert_eq!(error_of(&response).error, "Invalid URL format");
        assert_eq!(error_of(&response).scan_duration, None);
    }

    #[test]
    fn error_envelope_shape() {
        let response = ApiResponse::failure(502, "Failed to fetch x: 404 Not Found", Some(12));
        let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Failed to fetch x: 404 Not Found");
        assert_eq!(json["scanDuration"], 12);
    }

    #[test]
    fn request_parses_from_json() {
        let request = ScanRequest::from_json(r#"{"url":"https://site.example.com"}"#).unwrap();
        assert_eq!(request.url.as_deref(), Some("https://site.example.com"));
        assert!(ScanRequest::from_json("{}").unwrap().url.is_none());
        assert!(matches!(
            ScanRequest::from_json("nope"),
            Err(ScanError::InvalidInput(_))
        ));
    }
}
