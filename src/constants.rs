// ABOUTME: Re-exports application constants from lome-core
// ABOUTME: Keeps `crate::constants::...` paths stable for the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

//! Constants live in `lome-core`; this module re-exports them.

pub use lome_core::constants::*;
