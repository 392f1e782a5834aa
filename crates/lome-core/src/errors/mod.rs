// ABOUTME: Unified error handling with error codes, HTTP status mapping and JSON bodies
// ABOUTME: Every handler returns AppError so clients always get an `{error}` JSON body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! # Unified Error Handling System
//!
//! A single `AppError` type carries an `ErrorCode`, a message and optional
//! details. The code decides the HTTP status and whether the message may be
//! shown to the client. Internal failures are logged server-side and reach
//! the client only as `{"error": "Internal Server Error"}`.

/// Database error types
pub mod database;

pub use database::DatabaseError;

use crate::constants::error_messages;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No valid session attached to the request
    AuthRequired,
    /// Request body failed validation
    InvalidInput,
    /// Resource absent, or present but owned by another user
    ResourceNotFound,
    /// A write that passed its precondition affected no row
    StoreInconsistency,
    /// Endpoint exists but has no implementation
    NotImplemented,
    /// Store connectivity or query failure
    DatabaseError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::AuthRequired => 401,
            Self::ResourceNotFound => 404,
            Self::NotImplemented => 501,
            Self::StoreInconsistency | Self::DatabaseError => 500,
        }
    }

    /// Get a description of this error for logs
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::InvalidInput => "The provided input is invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::StoreInconsistency => "A store write affected no rows",
            Self::NotImplemented => "The endpoint is not implemented",
            Self::DatabaseError => "Database operation failed",
        }
    }

    /// Whether the error message may be sent to the client verbatim
    #[must_use]
    pub const fn exposes_message(self) -> bool {
        !matches!(self, Self::DatabaseError)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured details (validation reasons etc.)
    pub details: Option<serde_json::Value>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Message safe to return to the client
    #[must_use]
    pub fn public_message(&self) -> &str {
        if self.code.exposes_message() {
            &self.message
        } else {
            error_messages::INTERNAL_SERVER_ERROR
        }
    }

    /// No valid session
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ErrorCode::AuthRequired, error_messages::UNAUTHORIZED)
    }

    /// Conversation absent or owned by another user; callers must not distinguish
    #[must_use]
    pub fn conversation_not_found() -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            error_messages::CONVERSATION_NOT_FOUND,
        )
    }

    /// Route hidden in this environment
    #[must_use]
    pub fn route_not_found() -> Self {
        Self::new(ErrorCode::ResourceNotFound, error_messages::NOT_FOUND)
    }

    /// Validation failure; `reason` travels in `details`
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, error_messages::INVALID_REQUEST)
            .with_details(serde_json::Value::String(reason.into()))
    }

    /// A write that should have returned a row did not
    pub fn store_inconsistency(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreInconsistency, message)
    }

    /// Placeholder endpoint
    #[must_use]
    pub fn not_implemented() -> Self {
        Self::new(ErrorCode::NotImplemented, error_messages::NOT_IMPLEMENTED)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

/// HTTP error body: `{"error": "...", "details": ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Client-facing error message
    pub error: String,
    /// Optional details, only for client errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        let details = if error.code.exposes_message() {
            error.details.clone()
        } else {
            None
        };
        Self {
            error: error.public_message().to_owned(),
            details,
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        Self::database(error.to_string())
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status == http::StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.code = ?self.code,
                error.message = %self.message,
                "Request failed"
            );
        } else {
            tracing::debug!(
                error.code = ?self.code,
                error.message = %self.message,
                "Request rejected"
            );
        }

        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::ResourceNotFound.http_status(), 404);
        assert_eq!(ErrorCode::StoreInconsistency.http_status(), 500);
        assert_eq!(ErrorCode::NotImplemented.http_status(), 501);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
    }

    #[test]
    fn test_conversation_not_found_message() {
        let error = AppError::conversation_not_found();
        assert_eq!(error.message, "Conversation not found");
        assert_eq!(error.http_status(), 404);
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let error = AppError::database("no such table: conversations");
        let body = ErrorResponse::from(&error);
        assert_eq!(body.error, "Internal Server Error");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_store_inconsistency_message_is_exposed() {
        let error = AppError::store_inconsistency("Failed to create message");
        let body = ErrorResponse::from(&error);
        assert_eq!(body.error, "Failed to create message");
    }

    #[test]
    fn test_invalid_input_carries_details() {
        let error = AppError::invalid_input("title must be 1-255 characters");
        let json = serde_json::to_value(ErrorResponse::from(&error)).unwrap();
        assert_eq!(json["error"], "Invalid request");
        assert_eq!(json["details"], "title must be 1-255 characters");
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let json = serde_json::to_string(&ErrorResponse::from(&AppError::unauthorized())).unwrap();
        assert_eq!(json, r#"{"error":"Unauthorized"}"#);
    }
}
