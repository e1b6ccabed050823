// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logoplace-vision — the logo placement decision engine.
//
// Splits an image into four corner regions, scores each for text, visual
// clutter and free space, picks the best corner under a fixed positional
// bias, chooses a dark or light logo from the local background brightness,
// and composites the logo onto a copy of the image.

pub mod compose;
pub mod detect;
pub mod engine;
pub mod placement;
pub mod raster;

// Re-export the primary structs so callers can use `logoplace_vision::PlacementEngine` etc.
pub use compose::{CompositeOutcome, Compositor, ImageResizer, LanczosResizer, ResizeMode};
pub use detect::{CannyEdgeDetector, EdgeDetector, NoTextDetector, TextDetector};
pub use engine::{LogoSource, PlacementEngine, PlacementJob, PlacementReport, resolve_logo_dimensions};
pub use placement::{CornerAnalyzer, PlacementSelector, RankedCorner, Selection, VariantSelector};
pub use raster::ImageProcessor;

#[cfg(feature = "ocr")]
pub use detect::OcrTextDetector;
