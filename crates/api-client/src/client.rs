//! Low-level HTTP client for the backend API.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Standard error body returned by the backend on non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<String>,
}

/// HTTP client for the coursecart backend.
///
/// Carries a default `Authorization: Bearer <token>` header and a
/// per-request timeout from [`ApiConfig`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Creates a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut auth =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
                .map_err(|_| ApiError::Config(crate::config::ConfigError::InvalidToken))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init",
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Sends a GET request and deserializes the JSON response.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(endpoint, %url, "backend request");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint,
                source: e,
            })?;

        Self::parse_response(endpoint, resp).await
    }

    /// Sends a POST request with a JSON body and deserializes the response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(endpoint, %url, "backend request");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Http {
                endpoint,
                source: e,
            })?;

        Self::parse_response(endpoint, resp).await
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.as_str();
        let path = path.trim_start_matches('/');
        // A base with a path component may lack the trailing slash.
        if base.ends_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    async fn parse_response<T: DeserializeOwned>(
        endpoint: &'static str,
        resp: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = resp.status();

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let (message, errors) = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => (body.message, body.errors),
                // Not the standard shape; surface the raw body.
                Err(_) => (text, Vec::new()),
            };
            return Err(ApiError::Backend {
                endpoint,
                status: status.as_u16(),
                message,
                errors,
            });
        }

        resp.json().await.map_err(|e| ApiError::Deserialization {
            endpoint,
            source: e,
        })
    }
}
