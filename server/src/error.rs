//! HTTP error type and its mapping to JSON error responses.
//!
//! Every error response has the shape `{"error": <message>}`. Internal
//! failures are logged with their detail but answer with a fixed message.

use std::any::Any;

use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use todo_core::TodoError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unusable request fields.
    #[error("{0}")]
    Validation(String),

    /// The addressed todo does not exist.
    #[error("Todo not found")]
    TodoNotFound,

    /// No route matches the request path.
    #[error("Not found")]
    RouteNotFound,

    /// The path matches but the method is not routed.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request body exceeds the extractor's size limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Anything unexpected. The detail is logged only.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::TodoNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::Validation(msg) => ApiError::Validation(msg),
            TodoError::NotFound(_) => ApiError::TodoNotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(error = %other, "request rejected");
                other.to_string()
            }
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

impl From<PathRejection> for ApiError {
    // An `{id}` that cannot even be decoded is still just a route miss.
    fn from(_: PathRejection) -> Self {
        ApiError::RouteNotFound
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::Internal(format!("failed to read request body: {}", rejection.body_text()))
        }
    }
}

/// Response for a handler that panicked, used with `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
