// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Tiled Job Runtime (C3): per-job pipeline for both job types. Tiles
//! within a job are processed strictly sequentially on the calling task —
//! the `TileAnalyzer` is not assumed parallel-safe across one job's tiles,
//! and sequential progression is what keeps the progress signal monotone
//! and cheap to reason about (§5, §9).

use crate::components::{bounding_boxes, normalize_labels};
use crate::error::EngineError;
use crate::params::{CellSegmentationParams, TissueMaskParams};
use crate::render::{otsu_threshold, render_cell_artifacts, render_tissue_artifacts};
use crate::runtime_deps::RuntimeDeps;
use image::RgbImage;
use ndarray::Array3;
use wsi_adapters::{CellDetection, ResultPayload};
use wsi_core::{Job, JobId, JobType, StateStore};

const FALLBACK_TISSUE_THRESHOLD: f64 = 0.85;

pub async fn run_job(
    job: &Job,
    store: &StateStore,
    deps: &RuntimeDeps,
) -> Result<ResultPayload, EngineError> {
    match job.job_type {
        JobType::CellSegmentation => run_cell_segmentation(job, store, deps).await,
        JobType::TissueMask => run_tissue_mask(job, store, deps).await,
    }
}

async fn run_cell_segmentation(
    job: &Job,
    store: &StateStore,
    deps: &RuntimeDeps,
) -> Result<ResultPayload, EngineError> {
    let params = CellSegmentationParams::from_job_params(&job.params)?;
    let pyramid = deps
        .pyramid_factory
        .open(std::path::Path::new(&params.wsi_path))
        .await?;

    let (full_w, full_h) = pyramid.dimensions();
    let mut tiles = wsi_tiling::plan(full_w, full_h, params.tile_size, params.overlap)?;
    if let Some(max_tiles) = params.max_tiles {
        tiles.truncate(max_tiles);
    }

    store.with_job_mut(&job.id, |j| {
        j.tiles_total = tiles.len() as u64;
        j.recompute_progress();
    });
    save_progress(store, deps, &job.id).await?;

    let analyzer = deps.analyzer.get().await;
    let mut cells = Vec::new();

    for tile in &tiles {
        let rgb = pyramid
            .read_region((tile.x, tile.y), 0, (tile.w, tile.h))
            .await?;
        let rgb: Array3<u8> = rgb;
        let label_image = analyzer.analyze(&rgb, params.pixel_size_um).await?;
        let labels = normalize_labels(label_image)?;

        for component in bounding_boxes(&labels) {
            cells.push(CellDetection {
                bbox: (
                    tile.x + component.min_col,
                    tile.y + component.min_row,
                    tile.x + component.max_col,
                    tile.y + component.max_row,
                ),
                area_pixels: component.area_pixels,
                tile_index: tile.index,
                tile_origin: (tile.x, tile.y),
            });
        }

        store.with_job_mut(&job.id, |j| {
            j.tiles_done += 1;
            j.recompute_progress();
        });
        save_progress(store, deps, &job.id).await?;
    }

    let coarsest = pyramid.level_count() - 1;
    let (lw, lh) = pyramid.level_dimensions(coarsest)?;
    let base = read_base_image(&*pyramid, coarsest, lw, lh).await?;
    pyramid.close().await?;

    let boxes = cells.iter().map(|c| c.bbox);
    let (mask_bytes, overlay_bytes) = render_cell_artifacts(&base, (full_w, full_h), boxes)?;
    deps.result_store
        .save_artifact(&job.id, "mask.png", &mask_bytes)
        .await?;
    deps.result_store
        .save_artifact(&job.id, "overlay.png", &overlay_bytes)
        .await?;

    let payload = ResultPayload::CellSegmentation {
        wsi_path: params.wsi_path,
        pixel_size_um: params.pixel_size_um,
        tiles_processed: tiles.len() as u64,
        num_cells: cells.len(),
        cells,
        mask_png: outputs_url(&job.id, "mask.png"),
        overlay_png: outputs_url(&job.id, "overlay.png"),
    };
    deps.result_store.save_result(&job.id, &payload).await?;
    Ok(payload)
}

async fn run_tissue_mask(
    job: &Job,
    store: &StateStore,
    deps: &RuntimeDeps,
) -> Result<ResultPayload, EngineError> {
    let params = TissueMaskParams::from_job_params(&job.params)?;
    let pyramid = deps
        .pyramid_factory
        .open(std::path::Path::new(&params.wsi_path))
        .await?;

    // Not tiled: tiles_total stays 0, so progress is 0 while running and
    // the Lifecycle Controller sets it to exactly 1.0 on success (§9).
    save_progress(store, deps, &job.id).await?;

    let coarsest = pyramid.level_count() - 1;
    let (lw, lh) = pyramid.level_dimensions(coarsest)?;
    let base = read_base_image(&*pyramid, coarsest, lw, lh).await?;
    pyramid.close().await?;

    let gray = crate::render::luminance(&base);
    let threshold = otsu_threshold(&gray).unwrap_or(FALLBACK_TISSUE_THRESHOLD);
    let (mask_bytes, overlay_bytes) = render_tissue_artifacts(&base, threshold)?;

    deps.result_store
        .save_artifact(&job.id, "tissue_mask.png", &mask_bytes)
        .await?;
    deps.result_store
        .save_artifact(&job.id, "tissue_overlay.png", &overlay_bytes)
        .await?;

    let payload = ResultPayload::TissueMask {
        wsi_path: params.wsi_path,
        tissue_mask_png: outputs_url(&job.id, "tissue_mask.png"),
        tissue_overlay_png: outputs_url(&job.id, "tissue_overlay.png"),
    };
    deps.result_store.save_result(&job.id, &payload).await?;
    Ok(payload)
}

async fn read_base_image(
    pyramid: &dyn wsi_adapters::PyramidImage,
    level: u32,
    lw: u32,
    lh: u32,
) -> Result<RgbImage, EngineError> {
    let buf = pyramid.read_region((0, 0), level, (lw, lh)).await?;
    let (h, w, _) = buf.dim();
    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(
                col as u32,
                row as u32,
                image::Rgb([buf[[row, col, 0]], buf[[row, col, 1]], buf[[row, col, 2]]]),
            );
        }
    }
    Ok(img)
}

async fn save_progress(
    store: &StateStore,
    deps: &RuntimeDeps,
    job_id: &JobId,
) -> Result<(), EngineError> {
    if let Some(job) = store.get_job_by_id(job_id) {
        deps.result_store.save_progress(&job).await?;
    }
    Ok(())
}

fn outputs_url(job_id: &JobId, name: &str) -> String {
    format!("/outputs/{}/{}", job_id.as_str(), name)
}

#[cfg(test)]
#[path = "tile_runtime_tests.rs"]
mod tests;
