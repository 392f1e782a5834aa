// ABOUTME: Re-exports the domain models from lome-core
// ABOUTME: Conversations, messages, users and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Domain models live in `lome-core`; this module re-exports them.

pub use lome_core::models::*;
