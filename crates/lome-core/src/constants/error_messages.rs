// ABOUTME: Client-facing error message strings
// ABOUTME: Kept stable because clients match on the `error` field of JSON bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

/// No valid session on the request
pub const UNAUTHORIZED: &str = "Unauthorized";

/// Conversation absent or owned by someone else
pub const CONVERSATION_NOT_FOUND: &str = "Conversation not found";

/// Request body failed validation
pub const INVALID_REQUEST: &str = "Invalid request";

/// Rename matched the ownership check but the update returned no row
pub const FAILED_TO_UPDATE_CONVERSATION: &str = "Failed to update conversation";

/// Message insert returned no row
pub const FAILED_TO_CREATE_MESSAGE: &str = "Failed to create message";

/// Generic body for unhandled failures
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Route hidden or absent
pub const NOT_FOUND: &str = "Not Found";

/// Placeholder endpoints
pub const NOT_IMPLEMENTED: &str = "Not implemented";
