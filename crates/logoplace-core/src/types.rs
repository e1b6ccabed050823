// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Logoplace placement engine.
//
// Everything here is a request-scoped value: created at pipeline entry and
// dropped once the decision has been returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four fixed corner regions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners, in evaluation order. Ties in ranking go to the earlier one.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Wire name (`"top-left"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    pub fn is_bottom(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight)
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned box with inclusive start and exclusive end coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Bounds {
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Pixel count covered by the box.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// A corner identifier paired with its bounding box in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerRegion {
    pub corner: Corner,
    pub bounds: Bounds,
}

/// Which rendition of the logo to overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoVariant {
    /// Dark artwork, for bright backgrounds.
    Dark,
    /// Light artwork, for dark backgrounds.
    Light,
}

impl std::fmt::Display for LogoVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

/// Probed header information of one logo rendition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoAsset {
    pub width: u32,
    pub height: u32,
    /// Whether the encoded asset carries a transparency channel.
    pub has_alpha: bool,
    pub variant: LogoVariant,
}

/// Scoring result for a single corner.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerMetrics {
    pub corner: Corner,
    pub region: Bounds,
    pub has_text: bool,
    /// Fraction of region pixels marked as edges, in `[0, 1]`.
    pub edge_density: f64,
    /// Region width minus the preferred margin. Negative for tiny regions.
    pub available_width: i64,
    pub available_height: i64,
    /// Top-left anchor of the logo in image coordinates.
    pub anchor_x: i64,
    pub anchor_y: i64,
    pub space_sufficient: bool,
    pub suitability: f64,
}

/// The rectangle a logo will occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub corner: Corner,
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Result of background brightness sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantChoice {
    pub variant: LogoVariant,
    /// Mean luminance of the sampled rectangle, in `[0, 255]`.
    pub brightness: f64,
    /// Informational only; never used for admission.
    pub contrast_ratio: f64,
}

/// Why a placement was refused. The `Display` text is the response `reason`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementFailure {
    #[error("Failed to download image from {url}: {detail}")]
    AssetDownload { url: String, detail: String },

    #[error("No corners found suitable for logo placement")]
    NoSuitableCorner,

    #[error(
        "Insufficient space in best corner ({corner}). Available: {available_width}x{available_height}, Required: {required_width}x{required_height}"
    )]
    InsufficientSpace {
        corner: Corner,
        available_width: i64,
        available_height: i64,
        required_width: u32,
        required_height: u32,
    },

    #[error(
        "Low placement confidence ({score:.2}) in best corner ({corner}). May have text or visual conflicts."
    )]
    LowConfidence { corner: Corner, score: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Successful,
    Failed,
}

/// Final outcome of one placement request.
///
/// Built once through [`PlacementDecision::successful`] or
/// [`PlacementDecision::failed`]; there are no setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementDecision {
    status: DecisionStatus,
    reason: Option<String>,
    placement: Option<Placement>,
    selected_logo: Option<String>,
    output_image: Option<String>,
    #[serde(skip)]
    variant: Option<LogoVariant>,
    #[serde(skip)]
    failure: Option<PlacementFailure>,
}

impl PlacementDecision {
    pub fn successful(
        placement: Placement,
        variant: LogoVariant,
        selected_logo: impl Into<String>,
        output_image: Option<String>,
    ) -> Self {
        Self {
            status: DecisionStatus::Successful,
            reason: None,
            placement: Some(placement),
            selected_logo: Some(selected_logo.into()),
            output_image,
            variant: Some(variant),
            failure: None,
        }
    }

    pub fn failed(failure: PlacementFailure) -> Self {
        Self {
            status: DecisionStatus::Failed,
            reason: Some(failure.to_string()),
            placement: None,
            selected_logo: None,
            output_image: None,
            variant: None,
            failure: Some(failure),
        }
    }

    /// A failure that did not come from the engine (boundary faults).
    pub fn fault(message: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Failed,
            reason: Some(message.into()),
            placement: None,
            selected_logo: None,
            output_image: None,
            variant: None,
            failure: None,
        }
    }

    pub fn status(&self) -> DecisionStatus {
        self.status
    }

    pub fn is_successful(&self) -> bool {
        self.status == DecisionStatus::Successful
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    pub fn selected_logo(&self) -> Option<&str> {
        self.selected_logo.as_deref()
    }

    pub fn output_image(&self) -> Option<&str> {
        self.output_image.as_deref()
    }

    pub fn variant(&self) -> Option<LogoVariant> {
        self.variant
    }

    pub fn failure(&self) -> Option<&PlacementFailure> {
        self.failure.as_ref()
    }
}

fn default_true() -> bool {
    true
}

/// Body of a placement request as received from the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub image_url: String,
    pub dark_logo_url: String,
    pub light_logo_url: String,
    /// Produce and persist a composite.
    #[serde(default = "default_true")]
    pub return_image: bool,
    /// Try the S3 primary store before the local fallback.
    #[serde(default = "default_true")]
    pub upload_to_s3: bool,
}
