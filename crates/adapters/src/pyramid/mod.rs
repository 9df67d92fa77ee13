// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `PyramidImage` contract: an opaque handle onto a multi-resolution
//! whole-slide raster. One handle per job; not shared across workers (§5).

mod file_backed;

pub use file_backed::FileBackedPyramid;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakePyramidImage;

use async_trait::async_trait;
use ndarray::Array3;
use thiserror::Error;
use std::path::Path;

#[derive(Debug, Error)]
pub enum PyramidError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("requested level {level} out of range (have {level_count} levels)")]
    LevelOutOfRange { level: u32, level_count: u32 },
}

/// A multi-resolution raster handle. `level_count() - 1` is the coarsest
/// (lowest-resolution) level used for preview artifacts; level 0 is full
/// resolution.
#[async_trait]
pub trait PyramidImage: Send + Sync + 'static {
    async fn open(path: &Path) -> Result<Self, PyramidError>
    where
        Self: Sized;

    fn dimensions(&self) -> (u32, u32);
    fn level_count(&self) -> u32;
    fn level_dimensions(&self, level: u32) -> Result<(u32, u32), PyramidError>;

    /// Read an RGB region of `size` starting at `origin` (full-resolution
    /// coordinates scaled to `level`'s own grid by the caller) from `level`.
    async fn read_region(
        &self,
        origin: (u32, u32),
        level: u32,
        size: (u32, u32),
    ) -> Result<Array3<u8>, PyramidError>;

    /// Close the underlying source. Implementations that hold no external
    /// resource may no-op.
    async fn close(&self) -> Result<(), PyramidError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
