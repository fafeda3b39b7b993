//! Route handlers — parse the JSON body, call the component, pick a status.
//!
//! Every path answers with a JSON body, including malformed requests.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::AppState;
use crate::judge::{ExecutionRequest, ExecutionResult, ResultKind};
use crate::llm::{ChatKind, ChatRequest, ChatResult};

/// `POST /compile` — run code through the execution backend.
pub async fn compile(
    State(state): State<AppState>,
    body: Result<Json<ExecutionRequest>, JsonRejection>,
) -> (StatusCode, Json<ExecutionResult>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("rejected /compile body: {rejection}");
            let result = ExecutionResult::invalid_request(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(result));
        }
    };

    let result = match state.dispatcher.execute(request).await {
        Ok(result) => result,
        Err(unsupported) => {
            debug!(language = %unsupported.name, "unsupported language");
            ExecutionResult::unsupported_language(&unsupported)
        }
    };

    (execution_status(result.kind), Json(result))
}

/// `POST /chat` — ask the assistant.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResult>) {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("rejected /chat body: {rejection}");
            let result = ChatResult::new(rejection.body_text(), ChatKind::InvalidRequest);
            return (StatusCode::BAD_REQUEST, Json(result));
        }
    };

    let result = state.relay.chat(request).await;
    (chat_status(result.kind), Json(result))
}

/// `GET /` — liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// A program that failed to compile or crashed is still a successful call.
fn execution_status(kind: ResultKind) -> StatusCode {
    match kind {
        ResultKind::Program => StatusCode::OK,
        ResultKind::UnsupportedLanguage | ResultKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ResultKind::BrokerError => StatusCode::BAD_GATEWAY,
    }
}

fn chat_status(kind: ChatKind) -> StatusCode {
    match kind {
        ChatKind::Generated | ChatKind::Placeholder | ChatKind::EmptyPrompt => StatusCode::OK,
        ChatKind::InvalidRequest => StatusCode::BAD_REQUEST,
        ChatKind::BrokerError => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_status_mapping() {
        assert_eq!(execution_status(ResultKind::Program), StatusCode::OK);
        assert_eq!(
            execution_status(ResultKind::UnsupportedLanguage),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            execution_status(ResultKind::InvalidRequest),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            execution_status(ResultKind::BrokerError),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn chat_status_mapping() {
        assert_eq!(chat_status(ChatKind::Generated), StatusCode::OK);
        assert_eq!(chat_status(ChatKind::Placeholder), StatusCode::OK);
        assert_eq!(chat_status(ChatKind::EmptyPrompt), StatusCode::OK);
        assert_eq!(chat_status(ChatKind::InvalidRequest), StatusCode::BAD_REQUEST);
        assert_eq!(chat_status(ChatKind::BrokerError), StatusCode::BAD_GATEWAY);
    }
}
