//! Request handlers

pub mod employees;
pub mod export;

use crate::error::ApiError;
use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use roster_core::errors::{ExError, ExErrorKind};
use roster_core_types::RequestId;
use tracing::Instrument;

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Run every request inside a span tagged with its request id
///
/// A well-formed inbound `x-request-id` is kept; otherwise a new id is made.
pub async fn request_span(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(RequestId::from_header)
        .unwrap_or_default();
    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Run synchronous store or file work on the blocking pool
///
/// The current span is carried into the blocking task.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ExError> + Send + 'static,
    T: Send + 'static,
{
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(f))
        .await
        .map_err(|e| {
            ExError::new(ExErrorKind::Concurrency)
                .with_op("spawn_blocking")
                .with_message(e.to_string())
        })?
        .map_err(ApiError::from)
}
