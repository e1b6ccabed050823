// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Storage router — primary object store next to the original asset, local
// directory as fallback.

use std::io::Cursor;
use std::sync::Arc;

use image::{DynamicImage, ImageFormat};
use logoplace_core::error::{LogoplaceError, Result};
use logoplace_core::{Persist, StorageRoute};
use tracing::{info, instrument, warn};

use crate::local::LocalStore;
use crate::s3::{ObjectStore, S3Location};

/// [`Persist`] implementation shared by every request.
///
/// Without a primary store every composite goes to the local directory.
pub struct StorageRouter {
    primary: Option<Arc<dyn ObjectStore>>,
    local: LocalStore,
}

impl StorageRouter {
    pub fn new(local: LocalStore) -> Self {
        Self {
            primary: None,
            local,
        }
    }

    pub fn with_primary(mut self, primary: Arc<dyn ObjectStore>) -> Self {
        self.primary = Some(primary);
        self
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    fn store_primary(&self, primary: &dyn ObjectStore, png: &[u8], reference: &str) -> Result<String> {
        let target = S3Location::parse(reference)?.composite_location();
        primary.put_png(&target, png.to_vec())?;
        Ok(target.url())
    }
}

impl Persist for StorageRouter {
    #[instrument(skip(self, composite), fields(width = composite.width(), height = composite.height()))]
    fn persist(
        &self,
        composite: &DynamicImage,
        original_reference: &str,
        route: StorageRoute,
    ) -> Result<String> {
        let png = encode_png(composite)?;

        if route == StorageRoute::PrimaryWithFallback {
            if let Some(primary) = &self.primary {
                match self.store_primary(primary.as_ref(), &png, original_reference) {
                    Ok(locator) => {
                        info!(%locator, "Composite stored in primary location");
                        return Ok(locator);
                    }
                    Err(err) => warn!(error = %err, "Primary storage failed; using local fallback"),
                }
            }
        }

        let locator = self
            .local
            .save_png(&png)
            .map_err(|e| LogoplaceError::Persistence(format!("local fallback failed: {e}")))?;
        info!(%locator, "Composite stored locally");
        Ok(locator)
    }
}

/// Composites are always stored as PNG, whatever the original format.
fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|err| LogoplaceError::ImageEncode(format!("PNG encoding failed: {err}")))?;
    Ok(out.into_inner())
}
