//! Raw HTTP client for the generation backend.
//!
//! No broker awareness — just makes API calls via reqwest.

use async_trait::async_trait;
use codebroker_config::AssistantConfig;
use reqwest::Client;

use super::types::{GenerateRequest, GenerateResponse};
use super::GenerationBackend;

/// Errors from LLM operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Raw HTTP client for an Ollama-compatible generation API.
#[derive(Debug)]
pub struct GenerateClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GenerateClient {
    /// Create a client from config; the request timeout comes from config too.
    pub fn new(config: &AssistantConfig) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl GenerationBackend for GenerateClient {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(LlmError::ApiError {
                status,
                message: body,
            });
        }

        let resp: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(resp)
    }
}
