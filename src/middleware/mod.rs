// ABOUTME: HTTP middleware for request tracing, request ids and CORS
// ABOUTME: Layers applied to every route by the router builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request ids and spans
pub mod tracing;

pub use cors::setup_cors;
pub use tracing::{
    create_request_span, record_response, RequestContext, RequestIdGenerator, REQUEST_ID_HEADER,
};
