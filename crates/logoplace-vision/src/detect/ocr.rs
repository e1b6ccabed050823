// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR-backed text detection for corner analysis.
//
// A corner counts as "having text" when the `ocrs` engine (neural models run
// by `rten`) reads anything other than whitespace out of it.
//
// # Feature Gate
//
// Compiled only with the `ocr` feature:
//
// ```toml
// logoplace-vision = { path = "crates/logoplace-vision", features = ["ocr"] }
// ```
//
// # Models
//
// One directory holding `text-detection.rten` and `text-recognition.rten`.
// `ocrs-cli` downloads both into `~/.cache/ocrs` on first use. Build the
// models with `--release`; debug builds of `rten` are far too slow to serve.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage};
use logoplace_core::error::{LogoplaceError, Result};
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use tracing::{debug, info, instrument};

use super::capability::TextDetector;

/// Locations of the two model files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrModelPaths {
    pub detection: PathBuf,
    pub recognition: PathBuf,
}

impl OcrModelPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection: dir.join("text-detection.rten"),
            recognition: dir.join("text-recognition.rten"),
        }
    }

    /// The first model file that does not exist, if any.
    pub fn missing(&self) -> Option<&Path> {
        [&self.detection, &self.recognition]
            .into_iter()
            .find(|path| !path.exists())
            .map(PathBuf::as_path)
    }
}

fn load_model(path: &Path, role: &str) -> Result<Model> {
    Model::load_file(path).map_err(|err| {
        LogoplaceError::OcrError(format!("cannot load {role} model {}: {err}", path.display()))
    })
}

/// [`TextDetector`] that runs full OCR on each corner.
///
/// Loading is slow and the engine is immutable afterwards, so build one at
/// startup and share it.
pub struct OcrTextDetector {
    engine: OcrEngine,
}

impl OcrTextDetector {
    #[instrument(skip_all, fields(detection = %paths.detection.display()))]
    pub fn load(paths: &OcrModelPaths) -> Result<Self> {
        if let Some(missing) = paths.missing() {
            return Err(LogoplaceError::OcrError(format!(
                "model file {} not found; run `ocrs-cli` once to download the models",
                missing.display()
            )));
        }

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(load_model(&paths.detection, "detection")?),
            recognition_model: Some(load_model(&paths.recognition, "recognition")?),
            ..Default::default()
        })
        .map_err(|err| LogoplaceError::OcrError(format!("engine initialisation failed: {err}")))?;

        info!("OCR text detection ready");
        Ok(Self { engine })
    }

    pub fn from_model_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(&OcrModelPaths::in_dir(dir))
    }

    /// Everything the engine can read in `region`.
    pub fn read_region(&self, region: &GrayImage) -> Result<String> {
        let rgb = DynamicImage::ImageLuma8(region.clone()).into_rgb8();
        let source = ImageSource::from_bytes(rgb.as_raw(), rgb.dimensions())
            .map_err(|err| LogoplaceError::OcrError(format!("bad OCR input: {err}")))?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| LogoplaceError::OcrError(format!("preprocessing failed: {err}")))?;
        self.engine
            .get_text(&input)
            .map_err(|err| LogoplaceError::OcrError(format!("recognition failed: {err}")))
    }
}

impl TextDetector for OcrTextDetector {
    #[instrument(skip_all, fields(width = region.width(), height = region.height()))]
    fn detect_text(&self, region: &GrayImage) -> Result<bool> {
        if region.width() == 0 || region.height() == 0 {
            return Ok(false);
        }
        let text = self.read_region(region)?;
        let found = !text.trim().is_empty();
        debug!(found, chars = text.chars().count(), "OCR pass");
        Ok(found)
    }
}
