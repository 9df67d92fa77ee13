// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The External Contracts (C6): the seams where the tiled job runtime meets
//! swappable collaborators — a tile analyzer, a slide-pyramid reader, and a
//! result sink. Each contract is a small async trait plus a production
//! implementation and, behind `test-support`, a fake.

pub mod analyzer;
pub mod pyramid;
pub mod result_store;

pub use analyzer::{AnalyzerError, LabelImage, TileAnalyzer, ThresholdTileAnalyzer};
pub use pyramid::{FileBackedPyramid, PyramidError, PyramidImage};
pub use result_store::{CellDetection, ProgressSidecar, ResultPayload, ResultStore, ResultStoreError};

#[cfg(any(test, feature = "test-support"))]
pub use analyzer::FakeTileAnalyzer;
#[cfg(any(test, feature = "test-support"))]
pub use pyramid::FakePyramidImage;
#[cfg(any(test, feature = "test-support"))]
pub use result_store::InMemoryResultStore;
