// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner analysis — scores one corner region for logo suitability from text
// presence, edge density and margin arithmetic.

use image::DynamicImage;
use logoplace_core::{Bounds, Corner, CornerMetrics, PlacementConfig};
use tracing::{debug, warn};

use super::geometry::corner_region;
use crate::detect::capability::{EdgeDetector, TextDetector};
use crate::detect::edges::{edge_density, sobel_edge_density};
use crate::raster::processor::luminance_region;

/// Scores single corners against the two detection capabilities.
///
/// Never fails: a text capability error counts as "no text", an edge
/// capability error falls back to a Sobel estimate.
pub struct CornerAnalyzer<'a> {
    config: &'a PlacementConfig,
    text: &'a dyn TextDetector,
    edges: &'a dyn EdgeDetector,
}

impl<'a> CornerAnalyzer<'a> {
    pub fn new(
        config: &'a PlacementConfig,
        text: &'a dyn TextDetector,
        edges: &'a dyn EdgeDetector,
    ) -> Self {
        Self {
            config,
            text,
            edges,
        }
    }

    /// Score `corner` for a logo of `logo_width` x `logo_height`.
    ///
    /// Returns `None` only when the corner region has no pixels.
    pub fn analyze(
        &self,
        image: &DynamicImage,
        corner: Corner,
        logo_width: u32,
        logo_height: u32,
    ) -> Option<CornerMetrics> {
        let region = corner_region(image.width(), image.height(), corner).bounds;
        if region.is_empty() {
            debug!(%corner, "Corner region is empty; skipping");
            return None;
        }

        let gray = luminance_region(image, region);

        let has_text = match self.text.detect_text(&gray) {
            Ok(found) => found,
            Err(err) => {
                warn!(%corner, error = %err, "Text detection failed; assuming no text");
                false
            }
        };

        let edge_density = match self.edges.detect_edges(&gray) {
            Ok(map) => edge_density(&map, region.area()),
            Err(err) => {
                warn!(%corner, error = %err, "Edge detection failed; using gradient estimate");
                sobel_edge_density(&gray, self.config.canny_high_threshold)
            }
        };

        let metrics = measure_corner(
            corner,
            region,
            has_text,
            edge_density,
            logo_width,
            logo_height,
            self.config,
        );
        debug!(
            %corner,
            has_text,
            edge_density,
            available_width = metrics.available_width,
            available_height = metrics.available_height,
            space_sufficient = metrics.space_sufficient,
            suitability = metrics.suitability,
            "Corner analysed"
        );
        Some(metrics)
    }
}

/// Margin arithmetic, anchoring and scoring for already-measured signals.
pub fn measure_corner(
    corner: Corner,
    region: Bounds,
    has_text: bool,
    edge_density: f64,
    logo_width: u32,
    logo_height: u32,
    config: &PlacementConfig,
) -> CornerMetrics {
    let margin = config.preferred_margin as i64;
    let available_width = region.width() as i64 - margin;
    let available_height = region.height() as i64 - margin;
    let (anchor_x, anchor_y) = anchor(
        corner,
        region,
        available_width,
        available_height,
        logo_width,
        logo_height,
        margin,
    );
    let space_sufficient =
        available_width >= logo_width as i64 && available_height >= logo_height as i64;

    CornerMetrics {
        corner,
        region,
        has_text,
        edge_density,
        available_width,
        available_height,
        anchor_x,
        anchor_y,
        space_sufficient,
        suitability: suitability(has_text, edge_density, space_sufficient, config),
    }
}

/// Top-left logo position, inset by `margin` from the corner's two outer edges.
fn anchor(
    corner: Corner,
    region: Bounds,
    available_width: i64,
    available_height: i64,
    logo_width: u32,
    logo_height: u32,
    margin: i64,
) -> (i64, i64) {
    let x = if corner.is_right() {
        region.x1 as i64 + available_width - logo_width as i64
    } else {
        region.x1 as i64 + margin
    };
    let y = if corner.is_bottom() {
        region.y1 as i64 + available_height - logo_height as i64
    } else {
        region.y1 as i64 + margin
    };
    (x, y)
}

/// Unbiased score: starts at 1.0, every applicable penalty multiplies in.
pub fn suitability(
    has_text: bool,
    edge_density: f64,
    space_sufficient: bool,
    config: &PlacementConfig,
) -> f64 {
    let mut score = 1.0;
    if has_text {
        score *= config.text_penalty;
    }
    if edge_density > config.edge_density_threshold {
        score *= 1.0 - edge_density;
    }
    if !space_sufficient {
        score *= config.insufficient_space_penalty;
    }
    score
}
