use serde::{Deserialize, Serialize};

/// One cookie parsed from a `Set-Cookie` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Guest,
    Authenticated,
    Unknown,
}

impl std::fmt::Display for SessionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => write!(f, "guest"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Session established by the page fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSession {
    pub cookies: Vec<SessionCookie>,
    /// `name=value; name=value` form, suitable for a `Cookie` request header.
    #[serde(rename = "rawCookieHeader")]
    pub raw_header: String,
    pub session_type: SessionType,
}

impl Default for GuestSession {
    fn default() -> Self {
        Self {
            cookies: Vec::new(),
            raw_header: String::new(),
            session_type: SessionType::Unknown,
        }
    }
}
