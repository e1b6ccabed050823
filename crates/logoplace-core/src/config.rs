// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement and service configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LogoplaceError, Result};
use crate::types::Corner;

/// Positional preference applied to each corner's suitability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerBias {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_left: f64,
    pub bottom_right: f64,
}

impl CornerBias {
    /// Multiplier for a given corner.
    pub fn for_corner(&self, corner: Corner) -> f64 {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomLeft => self.bottom_left,
            Corner::BottomRight => self.bottom_right,
        }
    }
}

impl Default for CornerBias {
    fn default() -> Self {
        Self {
            top_left: 1.0,
            top_right: 1.05,
            bottom_left: 1.15,
            bottom_right: 1.25,
        }
    }
}

/// Heuristic constants driving the placement decision.
///
/// The defaults are empirically chosen and are the canonical values; they are
/// exposed here so deployments can pin them, not so they can be tuned per
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum clear space between a logo and the region edge.
    pub min_margin: u32,
    /// Clear space reserved between a logo and the region edge.
    pub preferred_margin: u32,
    /// Suitability multiplier when a corner contains text.
    pub text_penalty: f64,
    /// Edge density above which the `(1 - density)` penalty applies.
    pub edge_density_threshold: f64,
    /// Suitability multiplier when the logo does not fit.
    pub insufficient_space_penalty: f64,
    /// Winners below this biased suitability are rejected.
    pub confidence_threshold: f64,
    pub corner_bias: CornerBias,
    /// Logo size used when neither variant can be probed.
    pub default_logo_width: u32,
    pub default_logo_height: u32,
    /// Aspect-ratio difference above which resizing letterboxes instead of
    /// stretching.
    pub aspect_tolerance: f64,
    /// Mean brightness strictly above this selects the dark variant.
    pub dark_logo_threshold: f64,
    pub canny_low_threshold: f32,
    pub canny_high_threshold: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_margin: 12,
            preferred_margin: 25,
            text_penalty: 0.3,
            edge_density_threshold: 0.1,
            insufficient_space_penalty: 0.1,
            confidence_threshold: 0.3,
            corner_bias: CornerBias::default(),
            default_logo_width: 100,
            default_logo_height: 50,
            aspect_tolerance: 0.1,
            dark_logo_threshold: 127.0,
            canny_low_threshold: 50.0,
            canny_high_threshold: 150.0,
        }
    }
}

impl PlacementConfig {
    /// Reject values that would break the margin or scoring invariants.
    pub fn validate(&self) -> Result<()> {
        if self.min_margin > self.preferred_margin {
            return Err(LogoplaceError::Config(format!(
                "min_margin ({}) exceeds preferred_margin ({})",
                self.min_margin, self.preferred_margin
            )));
        }
        if self.default_logo_width == 0 || self.default_logo_height == 0 {
            return Err(LogoplaceError::Config(
                "default logo dimensions must be non-zero".into(),
            ));
        }
        if self.canny_low_threshold > self.canny_high_threshold {
            return Err(LogoplaceError::Config(format!(
                "canny low threshold ({}) exceeds high threshold ({})",
                self.canny_low_threshold, self.canny_high_threshold
            )));
        }
        Ok(())
    }
}

/// Settings for the HTTP service and its collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Socket address the HTTP server binds to.
    pub bind_address: String,
    /// Directory for locally stored composites (the fallback store).
    pub output_dir: PathBuf,
    /// Timeout for each asset download, in seconds.
    pub fetch_timeout_secs: u64,
    /// Named AWS profile for the S3 client; the default chain when unset.
    pub aws_profile: Option<String>,
    /// Directory holding the OCR models; text detection is disabled when unset.
    pub ocr_model_dir: Option<PathBuf>,
    pub placement: PlacementConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5001".into(),
            output_dir: PathBuf::from("outputs"),
            fetch_timeout_secs: 10,
            aws_profile: None,
            ocr_model_dir: None,
            placement: PlacementConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&data)?;
        config.placement.validate()?;
        Ok(config)
    }
}
