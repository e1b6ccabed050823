// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capability traits for the vision backends.
//
// Corner scoring only ever talks to these traits, so tests can plug in fixed
// answers instead of a real OCR model or edge detector.

use image::GrayImage;
use logoplace_core::error::Result;

/// Decides whether a luminance region contains readable text.
pub trait TextDetector: Send + Sync {
    /// `Ok(true)` iff the backend recognised non-empty text.
    fn detect_text(&self, region: &GrayImage) -> Result<bool>;
}

/// Produces a binary edge map for a luminance region.
pub trait EdgeDetector: Send + Sync {
    /// Returns a map the same size as `region`; non-zero pixels are edges.
    fn detect_edges(&self, region: &GrayImage) -> Result<GrayImage>;
}
