// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recognized job parameters (§6.2). Unknown keys are preserved in
//! [`wsi_core::job::JobParams`] but ignored here.

use crate::error::EngineError;
use wsi_core::JobParams;

const DEFAULT_TILE_SIZE: u32 = 512;
const DEFAULT_OVERLAP: u32 = 32;
const DEFAULT_PIXEL_SIZE_UM: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct CellSegmentationParams {
    pub wsi_path: String,
    pub tile_size: u32,
    pub overlap: u32,
    pub pixel_size_um: f64,
    pub max_tiles: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct TissueMaskParams {
    pub wsi_path: String,
}

fn required_wsi_path(params: &JobParams) -> Result<String, EngineError> {
    params
        .get("wsi_path")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| EngineError::InvalidParams("missing required parameter wsi_path".into()))
}

fn u32_param(params: &JobParams, key: &str, default: u32) -> u32 {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n as u32)
        .unwrap_or(default)
}

fn f64_param(params: &JobParams, key: &str, default: f64) -> f64 {
    params.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
}

impl CellSegmentationParams {
    pub fn from_job_params(params: &JobParams) -> Result<Self, EngineError> {
        Ok(Self {
            wsi_path: required_wsi_path(params)?,
            tile_size: u32_param(params, "tile_size", DEFAULT_TILE_SIZE),
            overlap: u32_param(params, "overlap", DEFAULT_OVERLAP),
            pixel_size_um: f64_param(params, "pixel_size_um", DEFAULT_PIXEL_SIZE_UM),
            max_tiles: params
                .get("max_tiles")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize),
        })
    }
}

impl TissueMaskParams {
    pub fn from_job_params(params: &JobParams) -> Result<Self, EngineError> {
        Ok(Self {
            wsi_path: required_wsi_path(params)?,
        })
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
