// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logo resampling — the resize capability and the aspect-ratio policy that
// decides between letterboxing and direct stretching.

use image::DynamicImage;
use image::imageops::FilterType;
use logoplace_core::error::{LogoplaceError, Result};
use tracing::trace;

/// How a logo should be brought to its target box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeMode {
    /// Preserve aspect ratio and fit inside the box.
    Fit,
    /// Stretch to the exact box.
    Exact,
}

/// Resampling capability used by the compositor.
pub trait ImageResizer: Send + Sync {
    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        mode: ResizeMode,
    ) -> Result<DynamicImage>;
}

/// High-quality Lanczos3 resampling from the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl ImageResizer for LanczosResizer {
    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
        mode: ResizeMode,
    ) -> Result<DynamicImage> {
        if width == 0 || height == 0 {
            return Err(LogoplaceError::Resize(format!(
                "target size {width}x{height} has no pixels"
            )));
        }
        let (out_w, out_h) = match mode {
            ResizeMode::Exact => (width, height),
            ResizeMode::Fit => fit_within((image.width(), image.height()), (width, height)),
        };
        trace!(?mode, out_w, out_h, "Resampling logo");
        Ok(image.resize_exact(out_w, out_h, FilterType::Lanczos3))
    }
}

/// Largest size with the `native` aspect ratio that fits inside `target`.
///
/// Truncates the derived side and never returns a zero dimension.
pub fn fit_within(native: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (nw, nh) = native;
    let (tw, th) = target;
    if nw == 0 || nh == 0 {
        return target;
    }
    let aspect = nw as f64 / nh as f64;
    let target_ratio = tw as f64 / th.max(1) as f64;
    let (w, h) = if aspect > target_ratio {
        (tw, (tw as f64 / aspect) as u32)
    } else {
        ((th as f64 * aspect) as u32, th)
    };
    (w.max(1), h.max(1))
}

/// Which resize, if any, a logo of `native` size needs for `target`.
///
/// `None` when the sizes already match. Aspect ratios further apart than
/// `tolerance` (absolute difference) letterbox; closer ones stretch.
pub fn resize_plan(native: (u32, u32), target: (u32, u32), tolerance: f64) -> Option<ResizeMode> {
    if native == target {
        return None;
    }
    let (nw, nh) = native;
    let (tw, th) = target;
    if nh == 0 || th == 0 {
        return Some(ResizeMode::Exact);
    }
    let aspect = nw as f64 / nh as f64;
    let target_ratio = tw as f64 / th as f64;
    if (aspect - target_ratio).abs() > tolerance {
        Some(ResizeMode::Fit)
    } else {
        Some(ResizeMode::Exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn wide_logo_is_letterboxed() {
        assert_eq!(resize_plan((200, 50), (100, 50), 0.1), Some(ResizeMode::Fit));
        assert_eq!(fit_within((200, 50), (100, 50)), (100, 25));
    }

    #[test]
    fn tall_logo_fits_height() {
        assert_eq!(fit_within((50, 100), (100, 50)), (25, 50));
    }

    #[test]
    fn close_ratio_stretches() {
        // 2.04 vs 2.0
        assert_eq!(resize_plan((204, 100), (100, 50), 0.1), Some(ResizeMode::Exact));
    }

    #[test]
    fn same_size_is_untouched() {
        assert_eq!(resize_plan((100, 50), (100, 50), 0.1), None);
    }

    #[test]
    fn lanczos_honours_mode() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 50, Rgba([9, 9, 9, 255])));
        let fit = LanczosResizer
            .resize(&logo, 100, 50, ResizeMode::Fit)
            .expect("fit");
        assert_eq!((fit.width(), fit.height()), (100, 25));

        let exact = LanczosResizer
            .resize(&logo, 100, 50, ResizeMode::Exact)
            .expect("exact");
        assert_eq!((exact.width(), exact.height()), (100, 50));
    }

    #[test]
    fn zero_target_is_an_error() {
        let logo = DynamicImage::ImageRgba8(RgbaImage::new(4, 4));
        assert!(LanczosResizer.resize(&logo, 0, 10, ResizeMode::Exact).is_err());
    }
}
