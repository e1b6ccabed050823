// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logo compositor — decodes the selected rendition, resizes it to the
// placement box and overlays it on a copy of the background.
//
// Composition never fails outright: any error yields the untouched background
// together with the error, and the caller decides how to report it.

use image::{DynamicImage, RgbaImage, imageops};
use logoplace_core::error::{LogoplaceError, Result};
use logoplace_core::{LogoAsset, LogoVariant, Placement};
use tracing::instrument;

use super::resize::{ImageResizer, resize_plan};
use crate::raster::ImageProcessor;

/// Result of a composition attempt.
#[derive(Debug)]
pub enum CompositeOutcome {
    Composited(DynamicImage),
    /// Composition failed; `image` is an unmodified copy of the background.
    Fallback {
        image: DynamicImage,
        error: LogoplaceError,
    },
}

impl CompositeOutcome {
    pub fn image(&self) -> &DynamicImage {
        match self {
            Self::Composited(image) | Self::Fallback { image, .. } => image,
        }
    }

    pub fn into_image(self) -> DynamicImage {
        match self {
            Self::Composited(image) | Self::Fallback { image, .. } => image,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

pub struct Compositor<'a> {
    resizer: &'a dyn ImageResizer,
    aspect_tolerance: f64,
}

impl<'a> Compositor<'a> {
    pub fn new(resizer: &'a dyn ImageResizer, aspect_tolerance: f64) -> Self {
        Self {
            resizer,
            aspect_tolerance,
        }
    }

    /// Overlay the `variant` logo (encoded bytes) onto a copy of `background`
    /// at `placement`.
    ///
    /// `None` for `logo` means the asset could not be retrieved and is treated
    /// like any other composition failure.
    #[instrument(skip_all, fields(variant = %variant, corner = %placement.corner, x = placement.x, y = placement.y))]
    pub fn composite(
        &self,
        background: &DynamicImage,
        logo: Option<&[u8]>,
        variant: LogoVariant,
        placement: &Placement,
    ) -> CompositeOutcome {
        match self.try_composite(background, logo, variant, placement) {
            Ok(image) => CompositeOutcome::Composited(image),
            Err(error) => CompositeOutcome::Fallback {
                image: background.clone(),
                error,
            },
        }
    }

    fn try_composite(
        &self,
        background: &DynamicImage,
        logo: Option<&[u8]>,
        variant: LogoVariant,
        placement: &Placement,
    ) -> Result<DynamicImage> {
        let bytes = logo.ok_or_else(|| {
            LogoplaceError::Composition(format!("{variant} logo asset is unavailable"))
        })?;
        let asset = ImageProcessor::probe_logo(bytes, variant)
            .map_err(|err| LogoplaceError::Composition(err.to_string()))?;
        let logo = image::load_from_memory(bytes)
            .map_err(|err| LogoplaceError::Composition(format!("failed to decode logo: {err}")))?;

        let target = (placement.width, placement.height);
        let logo = match resize_plan((asset.width, asset.height), target, self.aspect_tolerance) {
            Some(mode) => self.resizer.resize(&logo, target.0, target.1, mode)?,
            None => logo,
        };

        let mut canvas = background.to_rgba8();
        place(&mut canvas, &logo.to_rgba8(), &asset, placement);

        let canvas = DynamicImage::ImageRgba8(canvas);
        Ok(if background.color().has_alpha() {
            canvas
        } else {
            DynamicImage::ImageRgb8(canvas.to_rgb8())
        })
    }
}

/// Blend with the logo's own alpha when the asset has one, otherwise copy
/// its pixels over the background.
fn place(canvas: &mut RgbaImage, logo: &RgbaImage, asset: &LogoAsset, placement: &Placement) {
    if asset.has_alpha {
        imageops::overlay(canvas, logo, placement.x, placement.y);
    } else {
        imageops::replace(canvas, logo, placement.x, placement.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::resize::{LanczosResizer, ResizeMode};
    use crate::raster::processor::encode_to_format;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use logoplace_core::Corner;

    fn background() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(200, 100, Rgb([255, 255, 255])))
    }

    fn png(image: DynamicImage) -> Vec<u8> {
        encode_to_format(&image, ImageFormat::Png).expect("encode")
    }

    fn placement() -> Placement {
        Placement {
            corner: Corner::TopLeft,
            x: 10,
            y: 10,
            width: 40,
            height: 20,
        }
    }

    #[test]
    fn opaque_logo_replaces_pixels() {
        let logo = png(DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 20, Rgb([0, 0, 255]))));
        let bg = background();
        let out = Compositor::new(&LanczosResizer, 0.1).composite(&bg, Some(&logo), LogoVariant::Dark, &placement());

        assert!(!out.is_fallback());
        let img = out.into_image().to_rgb8();
        assert_eq!(img.get_pixel(10, 10), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(49, 29), &Rgb([0, 0, 255]));
        assert_eq!(img.get_pixel(50, 30), &Rgb([255, 255, 255]));
        // Input stays untouched.
        assert_eq!(bg.to_rgb8().get_pixel(10, 10), &Rgb([255, 255, 255]));
    }

    #[test]
    fn transparent_logo_pixels_keep_background() {
        let mut logo = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 0]));
        logo.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let logo = png(DynamicImage::ImageRgba8(logo));

        let out = Compositor::new(&LanczosResizer, 0.1)
            .composite(&background(), Some(&logo), LogoVariant::Dark, &placement())
            .into_image()
            .to_rgb8();
        assert_eq!(out.get_pixel(10, 10), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(20, 20), &Rgb([255, 255, 255]));
    }

    #[test]
    fn letterboxed_logo_sits_at_anchor() {
        // 80x10 (ratio 8) into 40x20 (ratio 2) gives 40x5.
        let logo = png(DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 10, Rgb([0, 0, 0]))));
        let out = Compositor::new(&LanczosResizer, 0.1)
            .composite(&background(), Some(&logo), LogoVariant::Dark, &placement())
            .into_image()
            .to_rgb8();
        assert_eq!(out.get_pixel(30, 12), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(30, 16), &Rgb([255, 255, 255]));
    }

    #[test]
    fn output_keeps_background_channels() {
        let logo = png(DynamicImage::ImageRgb8(RgbImage::new(40, 20)));
        let rgb = Compositor::new(&LanczosResizer, 0.1)
            .composite(&background(), Some(&logo), LogoVariant::Dark, &placement())
            .into_image();
        assert!(!rgb.color().has_alpha());

        let rgba_bg = DynamicImage::ImageRgba8(RgbaImage::new(200, 100));
        let rgba = Compositor::new(&LanczosResizer, 0.1)
            .composite(&rgba_bg, Some(&logo), LogoVariant::Dark, &placement())
            .into_image();
        assert!(rgba.color().has_alpha());
    }

    #[test]
    fn undecodable_logo_falls_back() {
        let bg = background();
        let out = Compositor::new(&LanczosResizer, 0.1).composite(&bg, Some(b"garbage"), LogoVariant::Dark, &placement());
        match out {
            CompositeOutcome::Fallback { image, error } => {
                assert_eq!(image, bg);
                assert!(matches!(error, LogoplaceError::Composition(_)));
            }
            CompositeOutcome::Composited(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn missing_logo_falls_back() {
        let bg = background();
        let out = Compositor::new(&LanczosResizer, 0.1).composite(&bg, None, LogoVariant::Light, &placement());
        assert!(out.is_fallback());
        assert_eq!(out.image(), &bg);
    }

    struct FailingResizer;

    impl ImageResizer for FailingResizer {
        fn resize(&self, _: &DynamicImage, _: u32, _: u32, _: ResizeMode) -> Result<DynamicImage> {
            Err(LogoplaceError::Resize("out of memory".into()))
        }
    }

    #[test]
    fn resize_failure_falls_back() {
        let logo = png(DynamicImage::ImageRgb8(RgbImage::new(90, 20)));
        let out = Compositor::new(&FailingResizer, 0.1).composite(&background(), Some(&logo), LogoVariant::Dark, &placement());
        match out {
            CompositeOutcome::Fallback { error, .. } => {
                assert!(matches!(error, LogoplaceError::Resize(_)));
            }
            CompositeOutcome::Composited(_) => panic!("expected fallback"),
        }
    }

    #[test]
    fn header_alpha_flag_selects_blending() {
        let mut canvas = RgbaImage::from_pixel(60, 40, Rgba([255, 255, 255, 255]));
        let clear = RgbaImage::from_pixel(40, 20, Rgba([0, 0, 0, 0]));
        let mut asset = LogoAsset {
            width: 40,
            height: 20,
            has_alpha: true,
            variant: LogoVariant::Dark,
        };

        place(&mut canvas, &clear, &asset, &placement());
        assert_eq!(canvas.get_pixel(10, 10), &Rgba([255, 255, 255, 255]));

        asset.has_alpha = false;
        place(&mut canvas, &clear, &asset, &placement());
        assert_eq!(canvas.get_pixel(10, 10), &Rgba([0, 0, 0, 0]));
    }
}
