// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text detector used when no OCR backend is available.

use image::GrayImage;
use logoplace_core::error::Result;

use super::capability::TextDetector;

/// Reports every region as text-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTextDetector;

impl TextDetector for NoTextDetector {
    fn detect_text(&self, _region: &GrayImage) -> Result<bool> {
        Ok(false)
    }
}
