// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates request IDs and creates one span per HTTP request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::body::Body;
use axum::response::Response;
use http::{HeaderMap, HeaderValue, Request};
use std::time::Duration;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request id in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn new_request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

/// Request context handlers attach to errors and logs
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id, from the client or generated
    pub request_id: String,
}

impl RequestContext {
    /// Context with a freshly generated request id
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: new_request_id(),
        }
    }

    /// Context for a request's headers; generates an id when none was sent
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|id| !id.is_empty())
            .map_or_else(Self::new, |id| Self {
                request_id: id.to_owned(),
            })
    }

    /// Record the id in the current tracing span
    pub fn record_in_span(&self) {
        Span::current().record("request_id", self.request_id.as_str());
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates `req_<uuid>` ids for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdGenerator;

impl MakeRequestId for RequestIdGenerator {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&new_request_id())
            .ok()
            .map(RequestId::new)
    }
}

/// Create a tracing span for an HTTP request
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record status and latency on the request span
pub fn record_response(response: &Response, latency: Duration, span: &Span) {
    span.record("status_code", response.status().as_u16());
    span.record("duration_ms", latency.as_millis() as u64);
    tracing::debug!(parent: span, "Response sent");
}
