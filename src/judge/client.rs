//! Raw HTTP client for the Judge0 submissions API.
//!
//! No broker awareness — just submits and waits via reqwest.

use async_trait::async_trait;
use codebroker_config::JudgeConfig;
use reqwest::Client;

use super::types::{Submission, SubmissionResult};
use super::ExecutionBackend;

/// Errors talking to the execution backend.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("execution backend error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Raw HTTP client for a Judge0 instance.
#[derive(Debug)]
pub struct Judge0Client {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl Judge0Client {
    /// Build a client from config. The request timeout is baked into the
    /// underlying reqwest client.
    pub fn new(config: &JudgeConfig) -> Result<Self, JudgeError> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn submissions_url(&self) -> String {
        format!(
            "{}/submissions?base64_encoded=false&wait=true",
            self.base_url
        )
    }
}

#[async_trait]
impl ExecutionBackend for Judge0Client {
    async fn submit(&self, submission: &Submission) -> Result<SubmissionResult, JudgeError> {
        let mut request = self
            .http
            .post(self.submissions_url())
            .header("content-type", "application/json")
            .json(submission);

        if let Some(token) = &self.auth_token {
            request = request.header("X-Auth-Token", token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();

        if status >= 400 {
            let body = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(JudgeError::ApiError {
                status,
                message: body,
            });
        }

        let result: SubmissionResult = response
            .json()
            .await
            .map_err(|e| JudgeError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(base_url: String) -> JudgeConfig {
        JudgeConfig {
            base_url,
            ..JudgeConfig::default()
        }
    }

    fn submission() -> Submission {
        Submission {
            source_code: "print(input())".into(),
            language_id: 71,
            stdin: "42".into(),
        }
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = Judge0Client::new(&config("http://judge:2358/".into())).unwrap();
        assert_eq!(
            client.submissions_url(),
            "http://judge:2358/submissions?base64_encoded=false&wait=true"
        );
    }

    #[tokio::test]
    async fn submits_and_parses() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/submissions")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("base64_encoded".into(), "false".into()),
                Matcher::UrlEncoded("wait".into(), "true".into()),
            ]))
            .match_body(Matcher::Json(serde_json::json!({
                "source_code": "print(input())",
                "language_id": 71,
                "stdin": "42",
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"stdout":"42\n","stderr":null,"status":{"id":3,"description":"Accepted"}}"#)
            .create_async()
            .await;

        let client = Judge0Client::new(&config(server.url())).unwrap();
        let result = client.submit(&submission()).await.unwrap();
        assert_eq!(result.stdout.as_deref(), Some("42\n"));
        assert_eq!(result.status.unwrap().description, "Accepted");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn sends_auth_token_when_configured() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/submissions")
            .match_query(Matcher::Any)
            .match_header("x-auth-token", "s3cret")
            .with_status(201)
            .with_body(r#"{"stdout":"","stderr":""}"#)
            .create_async()
            .await;

        let mut cfg = config(server.url());
        cfg.auth_token = Some("s3cret".into());
        let client = Judge0Client::new(&cfg).unwrap();
        client.submit(&submission()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/submissions")
            .match_query(Matcher::Any)
            .with_status(422)
            .with_body(r#"{"language_id":["language with id 999 doesn't exist"]}"#)
            .create_async()
            .await;

        let client = Judge0Client::new(&config(server.url())).unwrap();
        let err = client.submit(&submission()).await.unwrap_err();
        match err {
            JudgeError::ApiError { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("999"));
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn garbage_body_is_invalid_response() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/submissions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let client = Judge0Client::new(&config(server.url())).unwrap();
        let err = client.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, JudgeError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        // Port 1 is never listening.
        let client = Judge0Client::new(&config("http://127.0.0.1:1".into())).unwrap();
        let err = client.submit(&submission()).await.unwrap_err();
        assert!(matches!(err, JudgeError::Http(_)));
    }

    #[test]
    fn error_display() {
        let err = JudgeError::ApiError {
            status: 503,
            message: "queue full".into(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("queue full"));
    }
}
