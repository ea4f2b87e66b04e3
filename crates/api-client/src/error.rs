//! Backend client error types.

use crate::config::ConfigError;

/// Errors from backend API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport error (connect failure, timeout, ...).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// The backend returned a non-2xx status with its standard error body.
    #[error("backend {endpoint} returned {status}: {message}")]
    Backend {
        endpoint: &'static str,
        status: u16,
        message: String,
        /// Field-level detail strings, when the backend provides them.
        errors: Vec<String>,
    },

    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: &'static str,
        source: reqwest::Error,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Returns the HTTP status code for backend-rejected requests.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_only_for_backend_errors() {
        let err = ApiError::Backend {
            endpoint: "POST /vouchers/validate",
            status: 404,
            message: "unknown code".to_string(),
            errors: vec![],
        };
        assert_eq!(err.status_code(), Some(404));

        let err = ApiError::Config(ConfigError::MissingToken);
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_backend_error_display() {
        let err = ApiError::Backend {
            endpoint: "POST /payments/charge",
            status: 402,
            message: "card declined".to_string(),
            errors: vec![],
        };
        assert_eq!(
            err.to_string(),
            "backend POST /payments/charge returned 402: card declined"
        );
    }
}
