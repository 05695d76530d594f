//! Application error type mapping to HTTP status codes.
//!
//! Every error response has the body `{"error": {"code", "message"}}`.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::ConversationError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Errors surfaced by the conversation store or orchestrator.
    Conversation(ConversationError),
    /// The route exists but not for this method.
    MethodNotAllowed,
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::Conversation(ConversationError::InvalidRequest(message.into()))
    }

    /// Status code and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Conversation(ConversationError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST")
            }
            AppError::Conversation(ConversationError::StorageUnavailable(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_UNAVAILABLE")
            }
            AppError::Conversation(ConversationError::InferenceFailure(_)) => {
                (StatusCode::BAD_GATEWAY, "INFERENCE_FAILURE")
            }
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Conversation(ConversationError::InvalidRequest(msg)) => msg.clone(),
            AppError::Conversation(e) => e.to_string(),
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
        }
    }
}

impl From<ConversationError> for AppError {
    fn from(e: ConversationError) -> Self {
        AppError::Conversation(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::invalid_request(format!("invalid JSON body: {e}"))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_request(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, %message, "Request failed");
        } else {
            tracing::warn!(code, %message, "Request rejected");
        }

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        let cases = [
            (AppError::invalid_request("x"), StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            (
                ConversationError::StorageUnavailable("db".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_UNAVAILABLE",
            ),
            (
                ConversationError::InferenceFailure("down".into()).into(),
                StatusCode::BAD_GATEWAY,
                "INFERENCE_FAILURE",
            ),
            (AppError::MethodNotAllowed, StatusCode::METHOD_NOT_ALLOWED, "METHOD_NOT_ALLOWED"),
        ];

        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn invalid_request_message_is_unprefixed() {
        let err = AppError::invalid_request("message must not be empty");
        assert_eq!(err.message(), "message must not be empty");
    }
}
