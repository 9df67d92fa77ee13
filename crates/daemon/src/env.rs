// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon binary, in the
//! same spirit as the teacher's own `daemon/src/env.rs`.

use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// `WSI_BIND_ADDR`, default `0.0.0.0:8080`.
pub fn bind_addr() -> String {
    std::env::var("WSI_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// `WSI_OUTPUT_DIR`, default `./outputs`.
pub fn output_dir() -> PathBuf {
    std::env::var("WSI_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
