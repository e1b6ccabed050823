// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared server state handed to every axum handler.

use std::sync::Arc;

use logoplace_core::AssetFetcher;
use logoplace_storage::LocalStore;
use logoplace_vision::PlacementEngine;

/// Everything a request needs. Cheap to clone: all fields are `Arc`-backed or
/// small values.
#[derive(Clone)]
pub struct AppState {
    /// Synchronous decision pipeline, run on the blocking pool.
    pub engine: Arc<PlacementEngine>,
    /// Downloads backgrounds and logo renditions.
    pub fetcher: Arc<dyn AssetFetcher>,
    /// Local output directory, used by the cleanup endpoint.
    pub outputs: LocalStore,
}

impl AppState {
    pub fn new(engine: PlacementEngine, fetcher: Arc<dyn AssetFetcher>, outputs: LocalStore) -> Self {
        Self {
            engine: Arc::new(engine),
            fetcher,
            outputs,
        }
    }
}
