// ABOUTME: Re-exports the unified error types from lome-core
// ABOUTME: Server code imports AppError, AppResult and DatabaseError from here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Error types live in `lome-core`; this module re-exports them.

pub use lome_core::errors::*;
