// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge detection and edge-density measurement.

use image::GrayImage;
use imageproc::edges::canny;
use imageproc::gradients::sobel_gradients;
use logoplace_core::PlacementConfig;
use logoplace_core::error::Result;
use tracing::{instrument, trace};

use super::capability::EdgeDetector;

/// Canny edge detector backed by `imageproc`.
#[derive(Debug, Clone, Copy)]
pub struct CannyEdgeDetector {
    low_threshold: f32,
    high_threshold: f32,
}

impl CannyEdgeDetector {
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
        }
    }

    pub fn from_config(config: &PlacementConfig) -> Self {
        Self::new(config.canny_low_threshold, config.canny_high_threshold)
    }
}

impl Default for CannyEdgeDetector {
    fn default() -> Self {
        Self::from_config(&PlacementConfig::default())
    }
}

impl EdgeDetector for CannyEdgeDetector {
    #[instrument(skip_all, fields(width = region.width(), height = region.height()))]
    fn detect_edges(&self, region: &GrayImage) -> Result<GrayImage> {
        if region.width() == 0 || region.height() == 0 {
            return Ok(GrayImage::new(region.width(), region.height()));
        }
        let edges = canny(region, self.low_threshold, self.high_threshold);
        trace!("Canny edge map computed");
        Ok(edges)
    }
}

/// Fraction of `region_pixels` marked as edges in `edge_map`, clamped to `[0, 1]`.
pub fn edge_density(edge_map: &GrayImage, region_pixels: u64) -> f64 {
    if region_pixels == 0 {
        return 0.0;
    }
    let edge_pixels = edge_map.pixels().filter(|p| p.0[0] > 0).count() as u64;
    (edge_pixels as f64 / region_pixels as f64).clamp(0.0, 1.0)
}

/// Best-effort density from Sobel gradient magnitudes.
///
/// Used when the edge capability fails: any pixel whose gradient magnitude
/// exceeds `threshold` counts as an edge.
pub fn sobel_edge_density(region: &GrayImage, threshold: f32) -> f64 {
    let pixels = region.width() as u64 * region.height() as u64;
    if pixels == 0 {
        return 0.0;
    }
    let gradients = sobel_gradients(region);
    let strong = gradients
        .pixels()
        .filter(|p| p.0[0] as f32 > threshold)
        .count() as u64;
    (strong as f64 / pixels as f64).clamp(0.0, 1.0)
}
