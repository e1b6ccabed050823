// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement decision: corner geometry, per-corner scoring, ranking with
// admission rules, and logo variant selection.

pub mod analyzer;
pub mod geometry;
pub mod selector;
pub mod variant;

pub use analyzer::CornerAnalyzer;
pub use geometry::{corner_region, corner_regions};
pub use selector::{PlacementSelector, RankedCorner, Selection};
pub use variant::VariantSelector;
