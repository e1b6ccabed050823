// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator seams: asset retrieval and composite persistence.
//
// Both are owned outside the engine and handed in at construction time so
// tests can substitute deterministic stand-ins.

use async_trait::async_trait;
use image::DynamicImage;

use crate::error::Result;

/// Which persistence path a composite should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageRoute {
    /// Try the primary location derived from the original reference, then
    /// fall back to local storage.
    PrimaryWithFallback,
    /// Skip the primary location entirely.
    FallbackOnly,
}

/// Stores a composite image and returns a locator for it.
///
/// Implementations must be safe for concurrent use; one instance is shared by
/// every request.
pub trait Persist: Send + Sync {
    /// Persist `composite`. `original_reference` is the location of the source
    /// background and is used to derive the primary destination.
    fn persist(
        &self,
        composite: &DynamicImage,
        original_reference: &str,
        route: StorageRoute,
    ) -> Result<String>;
}

/// Downloads raw asset bytes (backgrounds and logo renditions).
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Fetch the bytes behind `url`. Non-success responses are errors.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
