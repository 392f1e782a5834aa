// ABOUTME: HTTP middleware for sessions, CORS, dev-only gating, error bodies and tracing
// ABOUTME: Layers applied by the router in server.rs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

/// CORS configuration
pub mod cors;
/// Production gate for development routes
pub mod dev_only;
/// JSON bodies for framework-generated errors
pub mod error_body;
/// Session resolution middleware
pub mod session;
/// Request id and trace layers
pub mod tracing;

pub use cors::setup_cors;
pub use dev_only::dev_only_middleware;
pub use error_body::json_error_body;
pub use session::{session_middleware, ExtractedSession};
pub use self::tracing::{create_trace_layer, request_id_header};
