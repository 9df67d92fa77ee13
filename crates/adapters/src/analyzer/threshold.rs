// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A production-lite default `TileAnalyzer`: thresholds tile luminance and
//! labels the resulting foreground blobs with 4-connectivity. Stands in for
//! a real nuclei-segmentation model; swap in a model-backed analyzer
//! without touching the runtime.

use super::{AnalyzerError, LabelImage, TileAnalyzer};
use async_trait::async_trait;
use ndarray::{Array2, Array3};

/// Luminance below this threshold (out of 255) is treated as foreground.
const DEFAULT_THRESHOLD: u8 = 110;

#[derive(Debug, Clone, Copy)]
pub struct ThresholdTileAnalyzer {
    threshold: u8,
}

impl ThresholdTileAnalyzer {
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl Default for ThresholdTileAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TileAnalyzer for ThresholdTileAnalyzer {
    async fn analyze(
        &self,
        rgb_tile: &Array3<u8>,
        _pixel_size_um: f64,
    ) -> Result<LabelImage, AnalyzerError> {
        let (h, w, c) = rgb_tile.dim();
        if c < 3 {
            return Err(AnalyzerError::Failed(format!(
                "expected an RGB tile, got {c} channels"
            )));
        }

        let mut foreground = Array2::<bool>::from_elem((h, w), false);
        for row in 0..h {
            for col in 0..w {
                let r = rgb_tile[[row, col, 0]] as u32;
                let g = rgb_tile[[row, col, 1]] as u32;
                let b = rgb_tile[[row, col, 2]] as u32;
                // ITU-R BT.601 luminance
                let luma = (299 * r + 587 * g + 114 * b) / 1000;
                foreground[[row, col]] = (luma as u8) < self.threshold;
            }
        }

        let labels = label_connected_components(&foreground);
        Ok(labels.mapv(|v| v as f32).into_dyn())
    }
}

/// 4-connectivity flood-fill labeling of a boolean foreground mask.
/// Background pixels are labeled 0; each connected foreground blob gets a
/// distinct positive label, in row-major discovery order.
fn label_connected_components(mask: &Array2<bool>) -> Array2<i32> {
    let (h, w) = mask.dim();
    let mut labels = Array2::<i32>::zeros((h, w));
    let mut next_label = 1;
    let mut stack = Vec::new();

    for start_row in 0..h {
        for start_col in 0..w {
            if !mask[[start_row, start_col]] || labels[[start_row, start_col]] != 0 {
                continue;
            }
            stack.push((start_row, start_col));
            labels[[start_row, start_col]] = next_label;
            while let Some((row, col)) = stack.pop() {
                let neighbors = [
                    (row.checked_sub(1), Some(col)),
                    (Some(row + 1), Some(col)),
                    (Some(row), col.checked_sub(1)),
                    (Some(row), Some(col + 1)),
                ];
                for (nr, nc) in neighbors {
                    let (Some(nr), Some(nc)) = (nr, nc) else {
                        continue;
                    };
                    if nr >= h || nc >= w {
                        continue;
                    }
                    if mask[[nr, nc]] && labels[[nr, nc]] == 0 {
                        labels[[nr, nc]] = next_label;
                        stack.push((nr, nc));
                    }
                }
            }
            next_label += 1;
        }
    }
    labels
}

#[cfg(test)]
#[path = "threshold_tests.rs"]
mod tests;
