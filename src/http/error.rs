//! API error taxonomy and wire shape.
//!
//! Every error response carries the same JSON body:
//! `{name, message, action, status_code}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input fields. Always 400.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Referenced resource absent. Always 404.
    #[error("resource not found")]
    NotFound,

    /// Store failure (persistence or invariant). Always 500; logged, the
    /// request fails instead of the process.
    #[error(transparent)]
    Internal(#[from] StoreError),
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub message: String,
    pub action: &'static str,
    pub status_code: u16,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "ValidationError",
            ApiError::NotFound => "NotFoundError",
            ApiError::Internal(_) => "InternalError",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(message) => message.clone(),
            ApiError::NotFound => "The requested resource was not found.".to_string(),
            ApiError::Internal(_) => "The server could not complete the request.".to_string(),
        }
    }

    fn action(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Adjust the request data and try again.",
            ApiError::NotFound => "Check the resource id and try again.",
            ApiError::Internal(_) => "Try again later.",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            name: self.name(),
            message: self.message(),
            action: self.action(),
            status_code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_of(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_wire_shape() {
        let response = ApiError::Validation("title must be a string".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body["name"], "ValidationError");
        assert_eq!(body["message"], "title must be a string");
        assert_eq!(body["status_code"], 400);
        assert!(body["action"].is_string());
    }

    #[tokio::test]
    async fn not_found_error_wire_shape() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_of(response).await;
        assert_eq!(body["name"], "NotFoundError");
        assert_eq!(body["status_code"], 404);
    }
}
