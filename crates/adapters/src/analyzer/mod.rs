// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `TileAnalyzer` contract: the opaque per-tile computation (e.g. a
//! nuclei segmentation model) that the tiled job runtime invokes once per
//! tile.

mod threshold;

pub use threshold::ThresholdTileAnalyzer;

#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AnalyzerCall, FakeTileAnalyzer};

use async_trait::async_trait;
use ndarray::ArrayD;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer failed: {0}")]
    Failed(String),
}

/// The raw label/probability array an analyzer returns for one tile. May
/// carry a singleton leading axis or a trailing channel axis; the tiled job
/// runtime is responsible for normalizing this into dense integer labels
/// (see `wsi_engine::runtime::normalize_labels`).
pub type LabelImage = ArrayD<f32>;

/// Analyzes one RGB tile, returning a label (or probability) image of the
/// same spatial extent. Instance identifiers need not be dense or globally
/// unique — only positive-vs-zero (background) matters to the runtime.
///
/// A single shared instance serves all jobs in a process; implementations
/// must be safe to call concurrently from multiple job workers (§5). If the
/// underlying model is not internally thread-safe, gate calls behind an
/// internal mutex rather than requiring callers to serialize.
#[async_trait]
pub trait TileAnalyzer: Send + Sync + 'static {
    async fn analyze(
        &self,
        rgb_tile: &ndarray::Array3<u8>,
        pixel_size_um: f64,
    ) -> Result<LabelImage, AnalyzerError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
