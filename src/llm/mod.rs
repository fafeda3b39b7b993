//! Assistant relay — forwards chat prompts to the generation backend.
//!
//! One prompt in, one complete answer out; streaming is always off.
//! Backend failures never escape: they become a `ChatResult` carrying a
//! fixed apology and the `broker_error` kind.

pub mod client;
pub mod prompts;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::judge::null_as_empty;
use client::LlmError;
use types::GenerateResponse;

/// Shown when the backend could not be reached or answered badly.
pub const FALLBACK_RESPONSE: &str = "Sorry, the assistant is unavailable right now.";

/// Substituted when the backend answered without any generated text.
pub const PLACEHOLDER_RESPONSE: &str = "unavailable";

/// Returned for an empty message; the backend is not called.
pub const EMPTY_PROMPT_RESPONSE: &str = "Please type a question for the assistant.";

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, LlmError>;
}

/// What the browser sends to the assistant.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
    /// Editor contents to give the assistant as context.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, alias = "lang")]
    pub language_name: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Where the text in `ChatResult::response` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Generated,
    Placeholder,
    EmptyPrompt,
    InvalidRequest,
    BrokerError,
}

/// Normalized assistant answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResult {
    pub response: String,
    pub kind: ChatKind,
}

impl ChatResult {
    pub fn new(response: impl Into<String>, kind: ChatKind) -> Self {
        Self {
            response: response.into(),
            kind,
        }
    }
}

/// Relays chat requests to a generation backend.
#[derive(Clone)]
pub struct AssistantRelay {
    backend: Arc<dyn GenerationBackend>,
}

impl AssistantRelay {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Ask the assistant. Always returns a result.
    pub async fn chat(&self, request: ChatRequest) -> ChatResult {
        if request.message.trim().is_empty() {
            return ChatResult::new(EMPTY_PROMPT_RESPONSE, ChatKind::EmptyPrompt);
        }

        let prompt = prompts::build_prompt(
            &request.message,
            request.code.as_deref(),
            request.language_name.as_deref(),
        );
        info!(prompt_chars = prompt.len(), "relaying chat prompt");

        match self.backend.generate(&prompt).await {
            Ok(resp) => match resp.text() {
                Some(text) => ChatResult::new(text, ChatKind::Generated),
                None => {
                    warn!("generation backend returned no text");
                    ChatResult::new(PLACEHOLDER_RESPONSE, ChatKind::Placeholder)
                }
            },
            Err(e) => {
                warn!("generation backend failed: {e}");
                ChatResult::new(FALLBACK_RESPONSE, ChatKind::BrokerError)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    struct StubBackend {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        reply: fn() -> Result<GenerateResponse, LlmError>,
    }

    impl StubBackend {
        fn new(reply: fn() -> Result<GenerateResponse, LlmError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait]
    impl GenerationBackend for StubBackend {
        async fn generate(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().await.push(prompt.to_string());
            (self.reply)()
        }
    }

    fn answer() -> Result<GenerateResponse, LlmError> {
        Ok(GenerateResponse {
            response: Some("Use a loop.".into()),
        })
    }

    fn no_text() -> Result<GenerateResponse, LlmError> {
        Ok(GenerateResponse::default())
    }

    fn broken() -> Result<GenerateResponse, LlmError> {
        Err(LlmError::InvalidResponse("truncated body".into()))
    }

    #[tokio::test]
    async fn returns_generated_text() {
        let backend = StubBackend::new(answer);
        let relay = AssistantRelay::new(backend.clone());
        let result = relay.chat(ChatRequest::new("how do I repeat?")).await;
        assert_eq!(result, ChatResult::new("Use a loop.", ChatKind::Generated));
        assert_eq!(backend.prompts.lock().await.as_slice(), ["how do I repeat?"]);
    }

    #[tokio::test]
    async fn empty_message_skips_backend() {
        let backend = StubBackend::new(answer);
        let relay = AssistantRelay::new(backend.clone());
        for msg in ["", "   \n\t"] {
            let result = relay.chat(ChatRequest::new(msg)).await;
            assert_eq!(result.kind, ChatKind::EmptyPrompt);
            assert_eq!(result.response, EMPTY_PROMPT_RESPONSE);
        }
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_text_becomes_placeholder() {
        let relay = AssistantRelay::new(StubBackend::new(no_text));
        let result = relay.chat(ChatRequest::new("hello")).await;
        assert_eq!(result.response, PLACEHOLDER_RESPONSE);
        assert_eq!(result.kind, ChatKind::Placeholder);
    }

    #[tokio::test]
    async fn backend_failure_becomes_fallback() {
        let relay = AssistantRelay::new(StubBackend::new(broken));
        let result = relay.chat(ChatRequest::new("hello")).await;
        assert_eq!(result.response, FALLBACK_RESPONSE);
        assert_eq!(result.kind, ChatKind::BrokerError);
    }

    #[tokio::test]
    async fn code_context_reaches_prompt() {
        let backend = StubBackend::new(answer);
        let relay = AssistantRelay::new(backend.clone());
        let request = ChatRequest {
            message: "why does this crash?".into(),
            code: Some("int main() { return *(int*)0; }".into()),
            language_name: Some("Cpp".into()),
        };
        relay.chat(request).await;

        let prompts = backend.prompts.lock().await;
        assert!(prompts[0].contains("```cpp\nint main() { return *(int*)0; }\n```"));
        assert!(prompts[0].ends_with("why does this crash?"));
    }

    #[test]
    fn request_null_message_reads_as_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":null}"#).unwrap();
        assert_eq!(req.message, "");
    }

    #[test]
    fn request_parses_with_only_message() {
        let req: ChatRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(req, ChatRequest::new("hi"));
    }

    #[test]
    fn result_serializes_kind_snake_case() {
        let json =
            serde_json::to_value(ChatResult::new(FALLBACK_RESPONSE, ChatKind::BrokerError))
                .unwrap();
        assert_eq!(json["kind"], "broker_error");
        assert_eq!(json["response"], FALLBACK_RESPONSE);
    }
}
