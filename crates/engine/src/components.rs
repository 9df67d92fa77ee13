// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tile-local label normalization and per-instance bounding boxes (§4.3
//! steps 3-4). The analyzer's label image may carry a singleton leading
//! axis or a trailing channel axis; this module is the one place that
//! normalization happens, independent of which analyzer produced the
//! array. Bounding boxes are extracted directly from distinct positive
//! label values rather than a separate flood-fill relabeling pass, since
//! the analyzer's instance ids already partition the foreground
//! (`original_source/instanseg_tasks.py`'s `regionprops` call does the
//! same thing over an already-labeled array).

use crate::error::EngineError;
use ndarray::{Array2, ArrayD, Axis, Ix2, Ix3};
use std::collections::HashMap;

/// One instance's tile-local bounding box and pixel area. `max_row`/
/// `max_col` are exclusive, matching the half-open convention used
/// throughout (§9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentBox {
    pub label: i64,
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
    pub area_pixels: u64,
}

/// Strip singleton leading axes, collapse a trailing channel axis by
/// per-pixel argmax, and reinterpret the result as integer labels.
pub fn normalize_labels(raw: ArrayD<f32>) -> Result<Array2<i64>, EngineError> {
    let mut arr = raw;
    while arr.ndim() > 2 && arr.shape()[0] == 1 {
        arr = arr.index_axis_move(Axis(0), 0);
    }

    match arr.ndim() {
        2 => {
            let labels = arr
                .into_dimensionality::<Ix2>()
                .map_err(|e| EngineError::AnalyzerFailure(e.to_string()))?;
            Ok(labels.mapv(|v| v.round() as i64))
        }
        3 => {
            let probs = arr
                .into_dimensionality::<Ix3>()
                .map_err(|e| EngineError::AnalyzerFailure(e.to_string()))?;
            let (h, w, _c) = probs.dim();
            let mut labels = Array2::<i64>::zeros((h, w));
            for row in 0..h {
                for col in 0..w {
                    let lane = probs.index_axis(Axis(0), row);
                    let lane = lane.index_axis(Axis(0), col);
                    let (best, _) = lane.iter().enumerate().fold(
                        (0usize, f32::NEG_INFINITY),
                        |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc },
                    );
                    labels[[row, col]] = best as i64;
                }
            }
            Ok(labels)
        }
        n => Err(EngineError::AnalyzerFailure(format!(
            "unexpected label image rank {n} after stripping singleton axes"
        ))),
    }
}

/// Distinct positive label values, each with its axis-aligned tile-local
/// bounding box and pixel count, sorted by label for determinism.
pub fn bounding_boxes(labels: &Array2<i64>) -> Vec<ComponentBox> {
    let mut acc: HashMap<i64, (u32, u32, u32, u32, u64)> = HashMap::new();
    let (h, w) = labels.dim();
    for row in 0..h {
        for col in 0..w {
            let label = labels[[row, col]];
            if label <= 0 {
                continue;
            }
            let row_u = row as u32;
            let col_u = col as u32;
            let entry = acc
                .entry(label)
                .or_insert((row_u, col_u, row_u + 1, col_u + 1, 0));
            entry.0 = entry.0.min(row_u);
            entry.1 = entry.1.min(col_u);
            entry.2 = entry.2.max(row_u + 1);
            entry.3 = entry.3.max(col_u + 1);
            entry.4 += 1;
        }
    }
    let mut boxes: Vec<ComponentBox> = acc
        .into_iter()
        .map(
            |(label, (min_row, min_col, max_row, max_col, area_pixels))| ComponentBox {
                label,
                min_row,
                min_col,
                max_row,
                max_col,
                area_pixels,
            },
        )
        .collect();
    boxes.sort_by_key(|b| b.label);
    boxes
}

#[cfg(test)]
#[path = "components_tests.rs"]
mod tests;
