// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A `PyramidImage` backed by the `image` crate. Real slide-pyramid formats
//! (e.g. SVS, NDPI) carry their own precomputed resolution levels; this
//! adapter decodes a single raster once and synthesizes a small power-of-two
//! pyramid on top of it by repeated box-filter downsampling, which is
//! sufficient for the coarsest-level previews and tiled full-resolution
//! reads the runtime actually needs.

use super::{PyramidError, PyramidImage};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use ndarray::Array3;
use std::path::{Path, PathBuf};

/// Levels are halved until the shorter side drops below this, capped at
/// `MAX_LEVELS` so a very large slide doesn't generate dozens of levels.
const MIN_COARSE_DIMENSION: u32 = 512;
const MAX_LEVELS: u32 = 6;

pub struct FileBackedPyramid {
    path: PathBuf,
    levels: Vec<RgbImage>,
}

impl FileBackedPyramid {
    fn build_levels(full: RgbImage) -> Vec<RgbImage> {
        let (mut w, mut h) = full.dimensions();
        let mut levels = vec![full];
        while levels.len() < MAX_LEVELS as usize && w.min(h) > MIN_COARSE_DIMENSION {
            w /= 2;
            h /= 2;
            let next = image::imageops::resize(&levels[levels.len() - 1], w, h, FilterType::Triangle);
            levels.push(next);
        }
        levels
    }
}

#[async_trait]
impl PyramidImage for FileBackedPyramid {
    async fn open(path: &Path) -> Result<Self, PyramidError> {
        let path = path.to_path_buf();
        let owned = path.clone();
        let decoded = tokio::task::spawn_blocking(move || image::open(&owned))
            .await
            .map_err(|e| PyramidError::SourceUnavailable(e.to_string()))?
            .map_err(|e| PyramidError::SourceUnavailable(format!("{}: {e}", path.display())))?;

        let rgb = match decoded {
            DynamicImage::ImageRgb8(buf) => buf,
            other => other.to_rgb8(),
        };
        Ok(Self {
            levels: Self::build_levels(rgb),
            path,
        })
    }

    fn dimensions(&self) -> (u32, u32) {
        self.levels[0].dimensions()
    }

    fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    fn level_dimensions(&self, level: u32) -> Result<(u32, u32), PyramidError> {
        self.levels
            .get(level as usize)
            .map(|img| img.dimensions())
            .ok_or(PyramidError::LevelOutOfRange {
                level,
                level_count: self.level_count(),
            })
    }

    async fn read_region(
        &self,
        origin: (u32, u32),
        level: u32,
        size: (u32, u32),
    ) -> Result<Array3<u8>, PyramidError> {
        let img = self
            .levels
            .get(level as usize)
            .ok_or(PyramidError::LevelOutOfRange {
                level,
                level_count: self.level_count(),
            })?;
        let (img_w, img_h) = img.dimensions();
        let (ox, oy) = origin;
        let (w, h) = (size.0.min(img_w.saturating_sub(ox)), size.1.min(img_h.saturating_sub(oy)));

        let mut out = Array3::<u8>::zeros((h as usize, w as usize, 3));
        for row in 0..h {
            for col in 0..w {
                let px = img.get_pixel(ox + col, oy + row);
                out[[row as usize, col as usize, 0]] = px[0];
                out[[row as usize, col as usize, 1]] = px[1];
                out[[row as usize, col as usize, 2]] = px[2];
            }
        }
        Ok(out)
    }

    async fn close(&self) -> Result<(), PyramidError> {
        let _ = &self.path;
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_backed_tests.rs"]
mod tests;
