//! Execution dispatcher — validates code submissions and relays them to Judge0.
//!
//! The language is resolved before any network I/O; an unknown language
//! never reaches the backend. Every backend failure is folded into an
//! `ExecutionResult` tagged `broker_error`, so callers can tell it apart
//! from a program that wrote to stderr.

pub mod client;
pub mod languages;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use client::JudgeError;
use types::{Submission, SubmissionResult};

/// Prefix on every broker-generated message in the output channel.
pub const ERROR_PREFIX: &str = "Error: ";

/// Something that can run a submission to completion.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionResult, JudgeError>;
}

/// What the browser sends to run code.
///
/// Field names follow the broker API; the editor's older `code` / `input` /
/// `lang` spellings are accepted too. Absent and `null` fields read as "".
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    #[serde(default, alias = "code", deserialize_with = "null_as_empty")]
    pub source_code: String,
    #[serde(default, alias = "input", deserialize_with = "null_as_empty")]
    pub stdin: String,
    #[serde(default, alias = "lang", deserialize_with = "null_as_empty")]
    pub language_name: String,
}

/// Deserialize a string field, reading JSON `null` as the empty string.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Where the text in `ExecutionResult::output` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// The program ran (or failed to compile); output is its own text.
    Program,
    /// Rejected locally; nothing was sent to the backend.
    UnsupportedLanguage,
    /// The request body could not be parsed.
    InvalidRequest,
    /// The backend could not be reached or answered badly.
    BrokerError,
}

/// Normalized execution outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: String,
    pub kind: ResultKind,
}

impl ExecutionResult {
    pub fn program(output: String) -> Self {
        Self {
            output,
            kind: ResultKind::Program,
        }
    }

    pub fn broker_error(detail: impl std::fmt::Display) -> Self {
        Self {
            output: format!("{ERROR_PREFIX}{detail}"),
            kind: ResultKind::BrokerError,
        }
    }

    pub fn invalid_request(detail: impl std::fmt::Display) -> Self {
        Self {
            output: format!("{ERROR_PREFIX}{detail}"),
            kind: ResultKind::InvalidRequest,
        }
    }

    pub fn unsupported_language(err: &UnsupportedLanguage) -> Self {
        Self {
            output: format!("{ERROR_PREFIX}{err}"),
            kind: ResultKind::UnsupportedLanguage,
        }
    }
}

/// The requested language is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language '{name}'. Supported: {}.", languages::supported().join(", "))]
pub struct UnsupportedLanguage {
    pub name: String,
}

/// Validates execution requests and relays them to an execution backend.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn ExecutionBackend>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ExecutionBackend>) -> Self {
        Self { backend }
    }

    /// Run one request.
    ///
    /// Returns `Err` only for an unknown language. Backend trouble comes
    /// back as `Ok` with `kind == BrokerError`.
    pub async fn execute(
        &self,
        request: ExecutionRequest,
    ) -> Result<ExecutionResult, UnsupportedLanguage> {
        let language_id =
            languages::resolve(&request.language_name).ok_or_else(|| UnsupportedLanguage {
                name: request.language_name.clone(),
            })?;

        info!(
            language = %request.language_name,
            language_id,
            source_bytes = request.source_code.len(),
            "dispatching submission"
        );

        let submission = Submission {
            source_code: request.source_code,
            language_id,
            stdin: request.stdin,
        };

        match self.backend.submit(&submission).await {
            Ok(result) => {
                if let Some(status) = &result.status {
                    info!(status = %status.description, "submission finished");
                }
                Ok(ExecutionResult::program(result.output()))
            }
            Err(e) => {
                warn!("execution backend failed: {e}");
                Ok(ExecutionResult::broker_error(e))
            }
        }
    }
}
