// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster helpers: decode backgrounds, probe logo headers, sample luminance,
// encode composites.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageDecoder, ImageFormat, ImageReader};
use logoplace_core::error::LogoplaceError;
use logoplace_core::{Bounds, LogoAsset, LogoVariant};
use tracing::{debug, instrument};

/// A decoded background image.
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    /// Decode any format the `image` crate recognises from its magic bytes.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, LogoplaceError> {
        let image = image::load_from_memory(data)
            .map_err(|err| LogoplaceError::ImageDecode(format!("cannot decode image: {err}")))?;
        debug!(width = image.width(), height = image.height(), color = ?image.color(), "Decoded");
        Ok(Self { image })
    }

    /// Native size and alpha presence of a logo, read from the header without
    /// decoding pixels.
    pub fn probe_logo(data: &[u8], variant: LogoVariant) -> Result<LogoAsset, LogoplaceError> {
        let decoder = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .and_then(|reader| reader.into_decoder().map_err(std::io::Error::other))
            .map_err(|err| LogoplaceError::ImageDecode(format!("{variant} logo unreadable: {err}")))?;

        let (width, height) = decoder.dimensions();
        if width == 0 || height == 0 {
            return Err(LogoplaceError::ImageDecode(format!(
                "{variant} logo is {width}x{height}"
            )));
        }
        Ok(LogoAsset { width, height, has_alpha: decoder.color_type().has_alpha(), variant })
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }
}

/// Crop `bounds` out of `image` as 8-bit luminance.
///
/// Bounds are clamped to the image; a box that falls outside it yields an
/// empty buffer.
pub fn luminance_region(image: &DynamicImage, bounds: Bounds) -> GrayImage {
    let right = bounds.x2.min(image.width());
    let bottom = bounds.y2.min(image.height());
    if bounds.x1 >= right || bounds.y1 >= bottom {
        return GrayImage::new(0, 0);
    }
    image.crop_imm(bounds.x1, bounds.y1, right - bounds.x1, bottom - bounds.y1).to_luma8()
}

/// Mean of a luminance buffer; `0.0` when empty.
pub fn mean_luminance(gray: &GrayImage) -> f64 {
    let samples = gray.as_raw();
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&v| u64::from(v)).sum::<u64>() as f64 / samples.len() as f64
}

pub fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, LogoplaceError> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, format)
        .map_err(|err| LogoplaceError::ImageEncode(format!("{format:?} encoding failed: {err}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn png(image: DynamicImage) -> Vec<u8> {
        encode_to_format(&image, ImageFormat::Png).expect("encode")
    }

    #[test]
    fn probe_reads_dimensions_and_alpha() {
        let rgba = png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(120, 40, Rgba([0, 0, 0, 128]))));
        let asset = ImageProcessor::probe_logo(&rgba, LogoVariant::Dark).expect("probe");
        assert_eq!((asset.width, asset.height), (120, 40));
        assert!(asset.has_alpha);
        assert_eq!(asset.variant, LogoVariant::Dark);

        let rgb = png(DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]))));
        assert!(!ImageProcessor::probe_logo(&rgb, LogoVariant::Light).expect("probe").has_alpha);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(ImageProcessor::probe_logo(b"not an image", LogoVariant::Dark).is_err());
        assert!(ImageProcessor::from_bytes(&[0u8; 16]).is_err());
    }

    #[test]
    fn luminance_crops_and_clamps() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 10, Luma([77u8])));

        let gray = luminance_region(&img, Bounds { x1: 5, y1: 5, x2: 20, y2: 20 });
        assert_eq!(gray.dimensions(), (5, 5));
        assert_eq!(mean_luminance(&gray), 77.0);

        let empty = luminance_region(&img, Bounds { x1: 12, y1: 0, x2: 20, y2: 5 });
        assert_eq!(empty.dimensions(), (0, 0));
        assert_eq!(mean_luminance(&empty), 0.0);
    }

    #[test]
    fn colour_sample_is_single_channel() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 6, Rgb([200, 200, 200])));
        let gray = luminance_region(&img, Bounds { x1: 0, y1: 0, x2: 3, y2: 3 });
        assert_eq!(gray.dimensions(), (3, 3));
        assert_eq!(gray.get_pixel(1, 1).0[0], 200);
    }

    #[test]
    fn decoded_png_keeps_size() {
        let bytes = png(DynamicImage::ImageRgb8(RgbImage::new(17, 9)));
        let back = ImageProcessor::from_bytes(&bytes).expect("decode").into_dynamic();
        assert_eq!((back.width(), back.height()), (17, 9));
    }
}
