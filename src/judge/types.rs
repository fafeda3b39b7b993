//! Rust types for the Judge0 submissions API.
//!
//! Only the fields the broker reads are modelled; everything else in the
//! response (time, memory, token, ...) is ignored by serde.

use serde::{Deserialize, Serialize};

/// Request body for `POST /submissions?wait=true`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Submission {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

/// Completed submission as returned by Judge0 in `wait=true` mode.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SubmissionResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
}

/// Judge0 verdict (`Accepted`, `Runtime Error (NZEC)`, ...).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SubmissionStatus {
    pub id: u32,
    pub description: String,
}

impl SubmissionResult {
    /// The text shown to the user.
    ///
    /// stderr if non-empty, else stdout, else the compiler output (set alone
    /// on a compilation error), else the empty string. Compiler warnings on a
    /// program that ran never hide its stdout.
    pub fn output(&self) -> String {
        [&self.stderr, &self.stdout, &self.compile_output]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_default()
    }
}
