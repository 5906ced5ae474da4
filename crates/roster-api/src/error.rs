//! HTTP error mapping
//!
//! Every failure leaves a handler as `{"message": .., "code": ..}` with a
//! status derived from the error kind.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::errors::{ExError, ExErrorKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    code: &'static str,
}

/// Handler error wrapping the structured `ExError`
#[derive(Debug)]
pub struct ApiError(pub ExError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ExErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ExErrorKind::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ExError> for ApiError {
    fn from(err: ExError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_body")
                .with_message(rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }
        // Internal detail stays in the log; clients get the short message.
        let message = if self.0.message().is_empty() {
            self.0.code()
        } else {
            self.0.message()
        };
        let body = ErrorBody {
            message,
            code: self.0.code(),
        };
        (status, Json(body)).into_response()
    }
}
