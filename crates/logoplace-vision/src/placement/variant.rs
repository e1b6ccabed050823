// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Variant selection — samples background brightness under the placement and
// picks the logo rendition that contrasts with it.

use image::DynamicImage;
use logoplace_core::{Bounds, LogoVariant, Placement, PlacementConfig, VariantChoice};
use tracing::debug;

use crate::raster::processor::{luminance_region, mean_luminance};

#[derive(Debug, Clone, Copy)]
pub struct VariantSelector {
    threshold: f64,
}

impl VariantSelector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &PlacementConfig) -> Self {
        Self::new(config.dark_logo_threshold)
    }

    /// Sample the background under `placement` and choose a variant.
    pub fn select(&self, image: &DynamicImage, placement: &Placement) -> VariantChoice {
        let brightness = mean_luminance(&luminance_region(image, placement_bounds(placement)));
        let choice = choose_variant(brightness, self.threshold);
        debug!(
            corner = %placement.corner,
            brightness,
            variant = %choice.variant,
            "Logo variant selected"
        );
        choice
    }
}

impl Default for VariantSelector {
    fn default() -> Self {
        Self::from_config(&PlacementConfig::default())
    }
}

/// Dark artwork only when the background is strictly brighter than `threshold`.
pub fn choose_variant(brightness: f64, threshold: f64) -> VariantChoice {
    let (variant, contrast_ratio) = if brightness > threshold {
        (LogoVariant::Dark, brightness / 255.0)
    } else {
        (LogoVariant::Light, (255.0 - brightness) / 255.0)
    };
    VariantChoice {
        variant,
        brightness,
        contrast_ratio,
    }
}

// Negative anchors clip to the image edge; the far edge is clamped later.
fn placement_bounds(placement: &Placement) -> Bounds {
    let to_u32 = |v: i64| v.clamp(0, u32::MAX as i64) as u32;
    Bounds {
        x1: to_u32(placement.x),
        y1: to_u32(placement.y),
        x2: to_u32(placement.x + placement.width as i64),
        y2: to_u32(placement.y + placement.height as i64),
    }
}
