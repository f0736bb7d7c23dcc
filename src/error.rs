use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to fetch {url}: {status} {reason}")]
    UpstreamStatus {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ScanError {
    /// HTTP-style status class for the boundary response.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            _ if self.is_upstream() => 502,
            _ => 500,
        }
    }

    pub fn exit_code(&self) -> i32 {
        2
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamStatus { .. } | Self::Transport { .. })
    }
}
