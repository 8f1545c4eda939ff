//! REST API client for the fal.ai HTTP endpoints.
//!
//! Wraps synchronous model runs and the two-step storage upload
//! (initiate, then `PUT` the bytes) using [`reqwest`].

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::FalConfig;
use crate::messages::{InitiateUploadResponse, RunResponse};

/// Longest response body kept in an [`FalApiError::ApiError`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for fal.ai.
#[derive(Debug, Clone)]
pub struct FalApi {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    storage_base: String,
}

/// Errors from the fal.ai REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum FalApiError {
    /// The HTTP request itself failed (network, DNS, TLS, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// fal.ai returned a non-2xx status code.
    #[error("fal.ai API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },
}

impl FalApi {
    /// Create a new API client.
    pub fn new(api_key: String, api_base: String, storage_base: String) -> Self {
        Self::with_client(reqwest::Client::new(), api_key, api_base, storage_base)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        api_key: String,
        api_base: String,
        storage_base: String,
    ) -> Self {
        Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            storage_base: storage_base.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration. `None` when no API key is set.
    pub fn from_config(config: &FalConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self::new(
            api_key,
            config.api_base.clone(),
            config.storage_base.clone(),
        ))
    }

    /// Full URL for running `model_id`.
    pub fn model_url(&self, model_id: &str) -> String {
        format!("{}/{}", self.api_base, model_id.trim_start_matches('/'))
    }

    /// Run a model synchronously and wait for its output.
    ///
    /// Sends `POST {api_base}/{model_id}` with `input` as the JSON body.
    pub async fn run(
        &self,
        model_id: &str,
        input: &serde_json::Value,
    ) -> Result<RunResponse, FalApiError> {
        let response = self
            .client
            .post(self.model_url(model_id))
            .header(AUTHORIZATION, self.auth_header())
            .json(input)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Upload a file to fal.ai storage and return its public URL.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        file_name: &str,
    ) -> Result<String, FalApiError> {
        let initiate: InitiateUploadResponse = {
            let body = serde_json::json!({
                "content_type": content_type,
                "file_name": file_name,
            });
            let response = self
                .client
                .post(format!(
                    "{}/storage/upload/initiate?storage_type=fal-cdn-v3",
                    self.storage_base
                ))
                .header(AUTHORIZATION, self.auth_header())
                .json(&body)
                .send()
                .await?;
            Self::parse_response(response).await?
        };

        let response = self
            .client
            .put(&initiate.upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        Ok(initiate.file_url)
    }

    // ---- private helpers ----

    fn auth_header(&self) -> String {
        format!("Key {}", self.api_key)
    }

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, FalApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FalApiError::ApiError {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_CHARS),
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, FalApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> FalApi {
        FalApi::new(
            "k".to_string(),
            "https://fal.run/".to_string(),
            "https://rest.alpha.fal.ai/".to_string(),
        )
    }

    #[test]
    fn model_url_joins_without_double_slash() {
        assert_eq!(
            api().model_url("/fal-ai/flux-pro/v1.1"),
            "https://fal.run/fal-ai/flux-pro/v1.1"
        );
    }

    #[test]
    fn no_client_without_api_key() {
        assert!(FalApi::from_config(&FalConfig::default()).is_none());
        let config = FalConfig {
            api_key: Some("secret".to_string()),
            ..FalConfig::default()
        };
        assert!(FalApi::from_config(&config).is_some());
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(600);
        let truncated = truncate(&body, MAX_ERROR_BODY_CHARS);
        assert_eq!(truncated.chars().count(), MAX_ERROR_BODY_CHARS + 3);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate("short", 10), "short");
    }
}
