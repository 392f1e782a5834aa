// ABOUTME: Configuration management module for server settings
// ABOUTME: Environment-driven configuration for ports, database, CORS and sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Configuration for the Lome chat server. All settings come from environment
//! variables (optionally loaded from a `.env` file).

/// Environment and server configuration
pub mod environment;

pub use environment::{DatabaseUrl, Environment, LogLevel, ServerConfig};
