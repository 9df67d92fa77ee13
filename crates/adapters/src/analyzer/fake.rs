// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake tile analyzer for testing.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AnalyzerError, LabelImage, TileAnalyzer};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AnalyzerCall {
    pub pixel_size_um: f64,
    pub tile_shape: (usize, usize),
}

struct FakeState {
    calls: Vec<AnalyzerCall>,
    next_result: Option<Result<LabelImage, AnalyzerError>>,
}

/// Returns a fixed (or queued) label image for every call, recording each
/// invocation so tests can assert on what the runtime passed in.
#[derive(Clone)]
pub struct FakeTileAnalyzer {
    inner: Arc<Mutex<FakeState>>,
}

impl Default for FakeTileAnalyzer {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                calls: Vec::new(),
                next_result: None,
            })),
        }
    }
}

impl FakeTileAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<AnalyzerCall> {
        self.inner.lock().calls.clone()
    }

    /// Set the label image this analyzer returns on every subsequent call.
    pub fn set_result(&self, result: Result<LabelImage, AnalyzerError>) {
        self.inner.lock().next_result = Some(result);
    }
}

#[async_trait]
impl TileAnalyzer for FakeTileAnalyzer {
    async fn analyze(
        &self,
        rgb_tile: &ndarray::Array3<u8>,
        pixel_size_um: f64,
    ) -> Result<LabelImage, AnalyzerError> {
        let mut inner = self.inner.lock();
        let (h, w, _) = rgb_tile.dim();
        inner.calls.push(AnalyzerCall {
            pixel_size_um,
            tile_shape: (h, w),
        });
        match &inner.next_result {
            Some(Ok(labels)) => Ok(labels.clone()),
            Some(Err(AnalyzerError::Failed(msg))) => Err(AnalyzerError::Failed(msg.clone())),
            None => Ok(ndarray::Array2::<f32>::zeros((h, w)).into_dyn()),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
