use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable {name} is not set")]
    MissingVar { name: &'static str },

    #[error("Provider URL {url} cannot carry a path")]
    NotABase { url: String },
}

/// Errors that can occur when exchanging client credentials for a token
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Failed to get access token: HTTP {status}")]
    Status { status: u16 },

    #[error("Token request failed: {source}")]
    Request {
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse token response: {source}")]
    InvalidResponse {
        #[source]
        source: serde_json::Error,
    },

    #[error("Token lifetime of {expires_in}s is out of range")]
    InvalidLifetime { expires_in: u64 },

    #[error("Credentials unavailable: {0}")]
    Config(#[from] ConfigError),
}

impl AuthError {
    /// Upstream HTTP status, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur when fetching catalog resources
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid request: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("HTTP request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Upstream HTTP status, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth(e) => e.status(),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
