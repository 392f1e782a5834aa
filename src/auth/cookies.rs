// ABOUTME: Cookie header parsing helpers
// ABOUTME: Extracts named values from the `Cookie` request header
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Lome Chat

use http::header::COOKIE;
use http::HeaderMap;

/// Get the value of cookie `name` from the request headers
///
/// Every `Cookie` header is searched; pairs are `;`-separated `name=value`
/// with surrounding whitespace ignored. Empty values count as absent.
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_owned())
        .filter(|value| !value.is_empty())
}
