// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Process wiring for the WSI workflow scheduler: owns the `tokio` runtime,
//! the admission scheduler loop, and the `axum` HTTP surface that exposes
//! it (§6.1). The binary in `src/main.rs` is the thin entry point; this
//! crate holds everything that's worth unit-testing without a real socket.

pub mod env;
pub mod error;
pub mod extract;
pub mod http;
pub mod state;
pub mod views;

#[cfg(test)]
mod test_support;
