// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Artifact rendering (§4.3.a): the coarsest-pyramid-level mask + red-tint
//! overlay pair both job types produce. Deterministic given the same
//! cells/tissue mask, as the spec requires.

use crate::error::EngineError;
use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use std::io::Cursor;

/// Fractional opacity a fully-positive mask pixel renders at in the overlay.
const OVERLAY_OPACITY: f64 = 0.35;

pub fn encode_png_gray(img: &GrayImage) -> Result<Vec<u8>, EngineError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn encode_png_rgb(img: &RgbImage) -> Result<Vec<u8>, EngineError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Tint `mask`-covered regions of `base` red at `opacity` of full red,
/// scaled by how "on" the mask pixel is (so an 8-bit mask tints less than
/// full opacity wherever it's partially set).
pub fn tint_red(base: &RgbImage, mask: &GrayImage, opacity: f64) -> RgbImage {
    let (w, h) = base.dimensions();
    let mut out = base.clone();
    for y in 0..h {
        for x in 0..w {
            let mask_frac = mask.get_pixel(x, y)[0] as f64 / 255.0;
            if mask_frac <= 0.0 {
                continue;
            }
            let alpha = mask_frac * opacity;
            let base_px = base.get_pixel(x, y);
            let blend = |channel: u8, red_channel: u8| -> u8 {
                (channel as f64 * (1.0 - alpha) + red_channel as f64 * alpha).round() as u8
            };
            out.put_pixel(
                x,
                y,
                Rgb([
                    blend(base_px[0], 255),
                    blend(base_px[1], 0),
                    blend(base_px[2], 0),
                ]),
            );
        }
    }
    out
}

/// Draw each global-coordinate bbox, scaled to the low-res grid, as a
/// filled rectangle — inclusive low corner, exclusive high corner (§4.3.a).
pub fn rasterize_boxes(
    lw: u32,
    lh: u32,
    full_w: u32,
    full_h: u32,
    boxes: impl IntoIterator<Item = (u32, u32, u32, u32)>,
) -> GrayImage {
    let sx = lw as f64 / full_w as f64;
    let sy = lh as f64 / full_h as f64;
    let mut mask = GrayImage::new(lw, lh);
    for (x_min, y_min, x_max, y_max) in boxes {
        let lx0 = ((x_min as f64) * sx).floor() as u32;
        let ly0 = ((y_min as f64) * sy).floor() as u32;
        let lx1 = (((x_max as f64) * sx).ceil() as u32).min(lw);
        let ly1 = (((y_max as f64) * sy).ceil() as u32).min(lh);
        for y in ly0..ly1 {
            for x in lx0..lx1 {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
    }
    mask
}

pub fn render_cell_artifacts(
    base: &RgbImage,
    full_dims: (u32, u32),
    boxes: impl IntoIterator<Item = (u32, u32, u32, u32)>,
) -> Result<(Vec<u8>, Vec<u8>), EngineError> {
    let (lw, lh) = base.dimensions();
    let mask = rasterize_boxes(lw, lh, full_dims.0, full_dims.1, boxes);
    let overlay = tint_red(base, &mask, OVERLAY_OPACITY);
    Ok((encode_png_gray(&mask)?, encode_png_rgb(&overlay)?))
}

/// ITU-R BT.601 luminance, normalized to `[0,1]`.
pub fn luminance(base: &RgbImage) -> Vec<f64> {
    base.pixels()
        .map(|p| {
            (0.299 * p[0] as f64 + 0.587 * p[1] as f64 + 0.114 * p[2] as f64) / 255.0
        })
        .collect()
}

/// Otsu's method over a 256-bin histogram of `[0,1]` grayscale values.
/// `None` for a degenerate histogram (all-zero, all-one, or empty).
pub fn otsu_threshold(gray: &[f64]) -> Option<f64> {
    if gray.is_empty() {
        return None;
    }
    let mut hist = [0u64; 256];
    for &v in gray {
        let bin = ((v.clamp(0.0, 1.0) * 255.0).round() as usize).min(255);
        hist[bin] += 1;
    }
    let total: u64 = hist.iter().sum();
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut weight_bg = 0u64;
    let mut sum_bg = 0.0f64;
    let mut best_var = 0.0f64;
    let mut best_bin: Option<usize> = None;

    for (bin, &count) in hist.iter().enumerate() {
        weight_bg += count;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }
        sum_bg += bin as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg as f64;
        let mean_fg = (sum_total - sum_bg) / weight_fg as f64;
        let between_class_var =
            (weight_bg as f64) * (weight_fg as f64) * (mean_bg - mean_fg).powi(2);
        if between_class_var > best_var {
            best_var = between_class_var;
            best_bin = Some(bin);
        }
    }
    best_bin.map(|bin| bin as f64 / 255.0)
}

pub fn render_tissue_artifacts(
    base: &RgbImage,
    threshold: f64,
) -> Result<(Vec<u8>, Vec<u8>), EngineError> {
    let (w, h) = base.dimensions();
    let mut mask = GrayImage::new(w, h);
    for (x, y, px) in base.enumerate_pixels() {
        let luma = (0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64) / 255.0;
        if luma < threshold {
            mask.put_pixel(x, y, Luma([255]));
        }
    }
    let overlay = tint_red(base, &mask, OVERLAY_OPACITY);
    Ok((encode_png_gray(&mask)?, encode_png_rgb(&overlay)?))
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
