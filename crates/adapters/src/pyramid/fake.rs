// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake pyramid for testing: an in-memory, single-level raster.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{PyramidError, PyramidImage};
use async_trait::async_trait;
use ndarray::Array3;
use std::path::Path;

#[derive(Clone)]
pub struct FakePyramidImage {
    levels: Vec<Array3<u8>>,
}

impl FakePyramidImage {
    /// A single-level pyramid filled with `fill`.
    pub fn solid(width: u32, height: u32, fill: [u8; 3]) -> Self {
        let mut buf = Array3::<u8>::zeros((height as usize, width as usize, 3));
        for mut px in buf.lanes_mut(ndarray::Axis(2)) {
            px[0] = fill[0];
            px[1] = fill[1];
            px[2] = fill[2];
        }
        Self { levels: vec![buf] }
    }

    /// Supply explicit pyramid levels, coarsest last.
    pub fn with_levels(levels: Vec<Array3<u8>>) -> Self {
        Self { levels }
    }
}

#[async_trait]
impl PyramidImage for FakePyramidImage {
    async fn open(_path: &Path) -> Result<Self, PyramidError> {
        Ok(Self::solid(64, 64, [200, 200, 200]))
    }

    fn dimensions(&self) -> (u32, u32) {
        let (h, w, _) = self.levels[0].dim();
        (w as u32, h as u32)
    }

    fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    fn level_dimensions(&self, level: u32) -> Result<(u32, u32), PyramidError> {
        self.levels
            .get(level as usize)
            .map(|buf| {
                let (h, w, _) = buf.dim();
                (w as u32, h as u32)
            })
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
        let buf = self
            .levels
            .get(level as usize)
            .ok_or(PyramidError::LevelOutOfRange {
                level,
                level_count: self.level_count(),
            })?;
        let (h, w, _) = buf.dim();
        let (ox, oy) = origin;
        let rw = size.0.min((w as u32).saturating_sub(ox)) as usize;
        let rh = size.1.min((h as u32).saturating_sub(oy)) as usize;
        Ok(buf
            .slice(ndarray::s![oy as usize..oy as usize + rh, ox as usize..ox as usize + rw, ..])
            .to_owned())
    }

    async fn close(&self) -> Result<(), PyramidError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
