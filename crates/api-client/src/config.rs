//! Backend client configuration loaded from environment variables.

use url::Url;

/// Configuration for connecting to the coursecart backend.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL of the backend API.
    pub base_url: Url,

    /// Bearer token sent in the `Authorization` header.
    pub api_token: String,

    /// Per-request timeout in seconds.
    ///
    /// In-flight requests are not aborted on navigation by the embedding
    /// UI; this bound keeps an abandoned request from lingering forever.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ApiConfig {
    /// Loads configuration from environment variables.
    ///
    /// Variables:
    /// - `COURSECART_API_URL` (default: `https://api.coursecart.example`)
    /// - `COURSECART_API_TOKEN` (required)
    /// - `COURSECART_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token =
            std::env::var("COURSECART_API_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        let raw = std::env::var("COURSECART_API_URL")
            .unwrap_or_else(|_| "https://api.coursecart.example".to_string());
        let base_url = Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidUrl("COURSECART_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            api_token,
            timeout_secs: std::env::var("COURSECART_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Creates a configuration pointing at a local mock server (for tests).
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_token: token.to_string(),
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The API token variable is unset.
    #[error("COURSECART_API_TOKEN environment variable is required")]
    MissingToken,

    /// The API token cannot be carried in an HTTP header.
    #[error("API token is not a valid header value")]
    InvalidToken,

    /// A URL failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
