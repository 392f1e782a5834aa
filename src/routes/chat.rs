// ABOUTME: Chat streaming route placeholder
// ABOUTME: Answers 501 until model streaming is wired in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use crate::errors::AppError;
use axum::{routing::post, Router};

/// Chat streaming routes
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create the chat routes
    pub fn routes() -> Router {
        Router::new().route("/chat/stream", post(Self::stream))
    }

    /// `POST /chat/stream`
    async fn stream() -> AppError {
        AppError::not_implemented()
    }
}
