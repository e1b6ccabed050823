// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement engine — the synchronous per-request pipeline.
//
// Takes already-fetched asset bytes, decides where the logo goes, picks the
// variant, composites and persists. Every outcome is a `PlacementDecision`;
// nothing in here returns an error to the caller.
//
// The engine is `Send + Sync` and holds no per-request state, so one instance
// is shared by every request and called from blocking worker threads.

use std::sync::Arc;

use image::DynamicImage;
use logoplace_core::{
    LogoVariant, Persist, PlacementConfig, PlacementDecision, PlacementFailure, StorageRoute,
    VariantChoice,
};
use tracing::{debug, info, instrument, warn};

use crate::compose::{CompositeOutcome, Compositor, ImageResizer, LanczosResizer};
use crate::detect::{CannyEdgeDetector, EdgeDetector, NoTextDetector, TextDetector};
use crate::placement::{CornerAnalyzer, PlacementSelector, RankedCorner, Selection, VariantSelector};
use crate::raster::ImageProcessor;

/// One logo rendition: where it came from and, if retrieval worked, its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSource {
    pub url: String,
    pub bytes: Option<Vec<u8>>,
}

impl LogoSource {
    pub fn new(url: impl Into<String>, bytes: Option<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            bytes,
        }
    }
}

/// All inputs of one placement request, after retrieval.
#[derive(Debug, Clone)]
pub struct PlacementJob {
    pub image_url: String,
    /// Background bytes, or the retrieval error detail.
    pub image: std::result::Result<Vec<u8>, String>,
    pub dark_logo: LogoSource,
    pub light_logo: LogoSource,
    pub return_image: bool,
    pub upload_to_s3: bool,
}

/// Decision plus the intermediate values that produced it.
#[derive(Debug)]
pub struct PlacementReport {
    pub decision: PlacementDecision,
    /// Biased ranking, best first. Empty when the background never decoded.
    pub ranked: Vec<RankedCorner>,
    pub variant: Option<VariantChoice>,
    pub composite: Option<CompositeOutcome>,
}

impl PlacementReport {
    fn failed(failure: PlacementFailure, ranked: Vec<RankedCorner>) -> Self {
        Self {
            decision: PlacementDecision::failed(failure),
            ranked,
            variant: None,
            composite: None,
        }
    }
}

pub struct PlacementEngine {
    config: PlacementConfig,
    text: Arc<dyn TextDetector>,
    edges: Arc<dyn EdgeDetector>,
    resizer: Arc<dyn ImageResizer>,
    storage: Option<Arc<dyn Persist>>,
}

impl PlacementEngine {
    /// Engine with Canny edges, no text detection, Lanczos resizing and no
    /// persistence.
    pub fn new(config: PlacementConfig) -> Self {
        let edges = CannyEdgeDetector::from_config(&config);
        Self {
            config,
            text: Arc::new(NoTextDetector),
            edges: Arc::new(edges),
            resizer: Arc::new(LanczosResizer),
            storage: None,
        }
    }

    pub fn with_text_detector(mut self, text: Arc<dyn TextDetector>) -> Self {
        self.text = text;
        self
    }

    pub fn with_edge_detector(mut self, edges: Arc<dyn EdgeDetector>) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_resizer(mut self, resizer: Arc<dyn ImageResizer>) -> Self {
        self.resizer = resizer;
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn Persist>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Rank the corners of `image` for a logo of the given size.
    pub fn select(&self, image: &DynamicImage, logo_width: u32, logo_height: u32) -> Selection {
        let analyzer = CornerAnalyzer::new(&self.config, self.text.as_ref(), self.edges.as_ref());
        PlacementSelector::new(analyzer, &self.config).select(image, logo_width, logo_height)
    }

    /// Run the whole pipeline for one request.
    #[instrument(skip_all, fields(image_url = %job.image_url))]
    pub fn run(&self, job: PlacementJob) -> PlacementReport {
        let background = match decode_background(&job) {
            Ok(image) => image,
            Err(failure) => {
                warn!(reason = %failure, "Background unavailable");
                return PlacementReport::failed(failure, Vec::new());
            }
        };

        let (logo_width, logo_height) = resolve_logo_dimensions(
            job.dark_logo.bytes.as_deref(),
            job.light_logo.bytes.as_deref(),
            &self.config,
        );

        let Selection { ranked, outcome } = self.select(&background, logo_width, logo_height);
        let placement = match outcome {
            Ok(placement) => placement,
            Err(failure) => {
                info!(reason = %failure, "Placement refused");
                return PlacementReport::failed(failure, ranked);
            }
        };

        let variant = VariantSelector::from_config(&self.config).select(&background, &placement);
        let logo = match variant.variant {
            LogoVariant::Dark => &job.dark_logo,
            LogoVariant::Light => &job.light_logo,
        };

        let mut composite = None;
        let mut output_image = None;
        if job.return_image {
            let outcome = Compositor::new(self.resizer.as_ref(), self.config.aspect_tolerance)
                .composite(&background, logo.bytes.as_deref(), variant.variant, &placement);
            if let CompositeOutcome::Fallback { error, .. } = &outcome {
                warn!(error = %error, "Composition failed; returning the unmodified background");
            }
            output_image = self.persist(outcome.image(), &job.image_url, job.upload_to_s3);
            composite = Some(outcome);
        }

        info!(
            corner = %placement.corner,
            x = placement.x,
            y = placement.y,
            variant = %variant.variant,
            output = output_image.as_deref().unwrap_or("-"),
            "Placement decided"
        );

        PlacementReport {
            decision: PlacementDecision::successful(
                placement,
                variant.variant,
                logo.url.clone(),
                output_image,
            ),
            ranked,
            variant: Some(variant),
            composite,
        }
    }

    fn persist(&self, composite: &DynamicImage, reference: &str, upload: bool) -> Option<String> {
        let storage = self.storage.as_ref()?;
        let route = if upload {
            StorageRoute::PrimaryWithFallback
        } else {
            StorageRoute::FallbackOnly
        };
        match storage.persist(composite, reference, route) {
            Ok(locator) => Some(locator),
            Err(err) => {
                warn!(error = %err, "Composite could not be stored");
                None
            }
        }
    }
}

fn decode_background(job: &PlacementJob) -> Result<DynamicImage, PlacementFailure> {
    let download_failure = |detail: String| PlacementFailure::AssetDownload {
        url: job.image_url.clone(),
        detail,
    };
    let bytes = job.image.as_ref().map_err(|detail| download_failure(detail.clone()))?;
    ImageProcessor::from_bytes(bytes)
        .map(ImageProcessor::into_dynamic)
        .map_err(|err| download_failure(err.to_string()))
}

/// Logo size used for placement: the dark rendition's native size, else the
/// light one's, else the configured default.
pub fn resolve_logo_dimensions(
    dark: Option<&[u8]>,
    light: Option<&[u8]>,
    config: &PlacementConfig,
) -> (u32, u32) {
    let candidates = [(dark, LogoVariant::Dark), (light, LogoVariant::Light)];
    for (bytes, variant) in candidates {
        let Some(bytes) = bytes else { continue };
        match ImageProcessor::probe_logo(bytes, variant) {
            Ok(asset) => {
                debug!(%variant, width = asset.width, height = asset.height, "Logo dimensions probed");
                return (asset.width, asset.height);
            }
            Err(err) => debug!(%variant, error = %err, "Logo probe failed"),
        }
    }
    (config.default_logo_width, config.default_logo_height)
}
