//! # Error Handling
//!
//! Typed errors for the storage layer and the plain-text error responses
//! returned by the page handlers. Every failure is terminal for its request:
//! nothing is retried and nothing is partially recovered.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::telemetry;

/// Errors raised by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    #[error("validation failed: {0}")]
    Validation(String),
}

impl RepositoryError {
    pub fn database_error(error: sea_orm::DbErr) -> Self {
        Self::Database(error)
    }

    pub fn validation_error<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }
}

/// Plain-text error response for the HTML surface.
///
/// The body is the human-readable message only; internal details are logged
/// and never echoed back to the client.
#[derive(Debug, Clone)]
pub struct PageError {
    pub status: StatusCode,
    pub message: Box<str>,
    pub trace_id: Option<Box<str>>,
}

impl PageError {
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into().into_boxed_str(),
            trace_id: telemetry::current_trace_id().map(String::into_boxed_str),
        }
    }

    /// 400 for a submission missing required input.
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404 for a lookup miss.
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500 with a generic client message; `source` is only logged.
    pub fn internal<E: std::fmt::Display>(message: &str, source: E) -> Self {
        let error = Self::new(StatusCode::INTERNAL_SERVER_ERROR, message);
        tracing::error!(
            trace_id = error.trace_id.as_deref().unwrap_or("-"),
            error = %source,
            "{}",
            message
        );
        error
    }
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.message)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.message.into_string()).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_is_plain_text() {
        let response = PageError::not_found("Agent not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "Agent not found");
    }

    #[tokio::test]
    async fn test_internal_hides_source() {
        let db_error = sea_orm::DbErr::Custom("connection reset by peer".to_string());
        let response = PageError::internal("Error loading directory", db_error).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert_eq!(body, "Error loading directory");
        assert!(!body.contains("connection reset"));
    }

    #[test]
    fn test_bad_request_status() {
        let error = PageError::bad_request("Missing required fields.");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "400 Missing required fields.");
    }

    #[test]
    fn test_repository_error_display() {
        let error = RepositoryError::validation_error("agent_handle is required");
        assert_eq!(error.to_string(), "validation failed: agent_handle is required");
    }
}
