// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State Store error kinds (§7).

use thiserror::Error;

/// Errors raised by [`crate::store::StateStore`].
///
/// `NotFound` is deliberately a single kind regardless of whether the id is
/// missing or simply owned by a different user (§4.1: "do not leak
/// existence").
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("invalid workflow spec: {0}")]
    InvalidSpec(String),
    #[error("job is not cancellable in its current status")]
    NotCancellable,
}
