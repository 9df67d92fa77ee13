// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime-level error kinds (§7): the ones a job's execution can raise,
//! on top of the admission-time `wsi_core::StoreError` kinds.

use thiserror::Error;
use wsi_adapters::{AnalyzerError, PyramidError, ResultStoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("analyzer failure: {0}")]
    AnalyzerFailure(String),
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] wsi_tiling::GeometryError),
    #[error("invalid job parameters: {0}")]
    InvalidParams(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<PyramidError> for EngineError {
    fn from(e: PyramidError) -> Self {
        match e {
            PyramidError::SourceUnavailable(msg) => EngineError::SourceUnavailable(msg),
            other => EngineError::SourceUnavailable(other.to_string()),
        }
    }
}

impl From<AnalyzerError> for EngineError {
    fn from(e: AnalyzerError) -> Self {
        match e {
            AnalyzerError::Failed(msg) => EngineError::AnalyzerFailure(msg),
        }
    }
}

impl From<ResultStoreError> for EngineError {
    fn from(e: ResultStoreError) -> Self {
        EngineError::PersistenceFailure(e.to_string())
    }
}

impl From<image::ImageError> for EngineError {
    fn from(e: image::ImageError) -> Self {
        EngineError::Internal(format!("image encode failure: {e}"))
    }
}
