// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced by [`crate::client::WsiClient`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to daemon failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The daemon answered with a non-2xx status. `message` is the `error`
    /// field from its JSON error body (§7), falling back to the status's
    /// canonical reason phrase if the body wasn't the expected shape.
    #[error("daemon returned {status}: {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
}
