// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ResultStore` contract: where progress sidecars, final results, and
//! rendered PNG artifacts land. A distinct output directory per job; no
//! cross-job contention (§5).

#[cfg(any(test, feature = "test-support"))]
mod in_memory;
#[cfg(any(test, feature = "test-support"))]
pub use in_memory::InMemoryResultStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use wsi_core::{Job, JobId};

#[derive(Debug, Error)]
pub enum ResultStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One detected cell instance, in global full-resolution coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellDetection {
    /// `(x_min, y_min, x_max, y_max)`, half-open on the high side.
    pub bbox: (u32, u32, u32, u32),
    pub area_pixels: u64,
    pub tile_index: usize,
    pub tile_origin: (u32, u32),
}

/// The final, job-type-specific payload handed to `save_result` (§6.4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResultPayload {
    CellSegmentation {
        wsi_path: String,
        pixel_size_um: f64,
        tiles_processed: u64,
        num_cells: usize,
        cells: Vec<CellDetection>,
        mask_png: String,
        overlay_png: String,
    },
    TissueMask {
        wsi_path: String,
        tissue_mask_png: String,
        tissue_overlay_png: String,
    },
}

/// The small JSON sidecar written after every tile (§6.4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressSidecar {
    pub status: String,
    pub progress: f64,
    pub tiles_done: u64,
    pub tiles_total: u64,
    pub error: Option<String>,
}

impl From<&Job> for ProgressSidecar {
    fn from(job: &Job) -> Self {
        Self {
            status: job.status.to_string(),
            progress: job.progress,
            tiles_done: job.tiles_done,
            tiles_total: job.tiles_total,
            error: job.error.clone(),
        }
    }
}

#[async_trait]
pub trait ResultStore: Send + Sync + 'static {
    async fn save_progress(&self, job: &Job) -> Result<(), ResultStoreError>;
    async fn save_result(&self, job_id: &JobId, payload: &ResultPayload) -> Result<(), ResultStoreError>;

    /// Write raw PNG bytes for a named artifact (`mask.png`, `overlay.png`,
    /// etc.) under this job's output directory.
    async fn save_artifact(
        &self,
        job_id: &JobId,
        name: &str,
        png_bytes: &[u8],
    ) -> Result<(), ResultStoreError>;

    /// The on-disk path an artifact named `name` would be written to,
    /// whether or not it exists yet.
    fn artifact_path(&self, job_id: &JobId, name: &str) -> PathBuf;

    /// Load the final result JSON, if present. `Ok(None)` means the job
    /// never produced one (still running, or failed before writing it).
    async fn load_result(&self, job_id: &JobId) -> Result<Option<ResultPayload>, ResultStoreError>;

    /// Load a previously saved artifact's raw bytes, if present.
    async fn load_artifact(
        &self,
        job_id: &JobId,
        name: &str,
    ) -> Result<Option<Vec<u8>>, ResultStoreError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
