//! Rust types for the generation backend's `/api/generate` endpoint.
//!
//! Serde-serializable to JSON for HTTP calls.

use serde::{Deserialize, Serialize};

/// Request body for a one-shot, non-streaming generation.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false: the broker waits for the full answer.
    pub stream: bool,
}

/// Response from the generation backend.
///
/// Only the generated text is read; it is optional so a response without
/// it still parses and the relay decides what to show in that case.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
}

impl GenerateResponse {
    /// The generated text, if the backend sent any.
    pub fn text(&self) -> Option<&str> {
        self.response.as_deref()
    }
}
