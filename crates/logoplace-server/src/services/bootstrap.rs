// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Startup wiring — configuration loading and construction of the engine,
// storage router and asset fetcher. Runs once per process.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use logoplace_core::error::Result;
use logoplace_core::ServiceConfig;
use logoplace_storage::{LocalStore, S3ObjectStore, StorageRouter};
use logoplace_vision::{NoTextDetector, PlacementEngine, TextDetector};
use tracing::{info, warn};

use super::fetch::HttpAssetFetcher;
use crate::state::AppState;

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bind_address: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub aws_profile: Option<String>,
    pub ocr_model_dir: Option<PathBuf>,
}

/// Read `path` if given (defaults otherwise), then apply `overrides`.
pub fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            ServiceConfig::load(path)?
        }
        None => ServiceConfig::default(),
    };

    if let Some(bind) = overrides.bind_address {
        config.bind_address = bind;
    }
    if let Some(dir) = overrides.output_dir {
        config.output_dir = dir;
    }
    if overrides.aws_profile.is_some() {
        config.aws_profile = overrides.aws_profile;
    }
    if overrides.ocr_model_dir.is_some() {
        config.ocr_model_dir = overrides.ocr_model_dir;
    }
    config.placement.validate()?;
    Ok(config)
}

/// Text detection backend for this build and configuration.
///
/// Falls back to [`NoTextDetector`] when OCR is not compiled in, not
/// configured, or its models fail to load.
pub fn text_detector(config: &ServiceConfig) -> Arc<dyn TextDetector> {
    let Some(dir) = config.ocr_model_dir.as_deref() else {
        info!("No OCR model directory configured; text detection disabled");
        return Arc::new(NoTextDetector);
    };

    #[cfg(feature = "ocr")]
    {
        match logoplace_vision::OcrTextDetector::from_model_dir(dir) {
            Ok(ocr) => return Arc::new(ocr),
            Err(e) => warn!(error = %e, "OCR unavailable; text detection disabled"),
        }
    }
    #[cfg(not(feature = "ocr"))]
    warn!(dir = %dir.display(), "Built without the `ocr` feature; text detection disabled");

    Arc::new(NoTextDetector)
}

/// S3 client from the default credential chain, optionally pinned to a
/// named profile.
pub async fn s3_client(profile: Option<&str>) -> aws_sdk_s3::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(profile) = profile {
        loader = loader.profile_name(profile);
    }
    let sdk_config = loader.load().await;
    aws_sdk_s3::Client::new(&sdk_config)
}

/// Build the full application state. Must run inside the tokio runtime.
pub async fn build_state(config: &ServiceConfig, enable_s3: bool) -> Result<AppState> {
    let outputs = LocalStore::new(&config.output_dir);
    let mut storage = StorageRouter::new(outputs.clone());
    if enable_s3 {
        let client = s3_client(config.aws_profile.as_deref()).await;
        let handle = tokio::runtime::Handle::current();
        storage = storage.with_primary(Arc::new(S3ObjectStore::new(client, handle)));
        info!(profile = config.aws_profile.as_deref().unwrap_or("default"), "S3 primary storage enabled");
    } else {
        info!("S3 disabled; composites are stored locally only");
    }

    let engine = PlacementEngine::new(config.placement.clone())
        .with_text_detector(text_detector(config))
        .with_storage(Arc::new(storage));
    let fetcher = HttpAssetFetcher::new(Duration::from_secs(config.fetch_timeout_secs))?;

    Ok(AppState::new(engine, Arc::new(fetcher), outputs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logoplace.json");
        std::fs::write(
            &path,
            r#"{"bind_address": "127.0.0.1:9000", "output_dir": "/srv/out", "fetch_timeout_secs": 3}"#,
        )
        .expect("write");

        let config = load_config(
            Some(&path),
            Overrides {
                bind_address: Some("0.0.0.0:8080".into()),
                ..Default::default()
            },
        )
        .expect("config");
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));
        assert_eq!(config.fetch_timeout_secs, 3);
    }

    #[test]
    fn defaults_without_file() {
        let config = load_config(None, Overrides::default()).expect("config");
        assert_eq!(config.bind_address, "0.0.0.0:5001");
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Some(Path::new("/nonexistent/logoplace.json")), Overrides::default()).is_err());
    }

    #[test]
    fn unconfigured_ocr_disables_text_detection() {
        let detector = text_detector(&ServiceConfig::default());
        let region = image::GrayImage::new(10, 10);
        assert!(!detector.detect_text(&region).expect("detect"));
    }
}
