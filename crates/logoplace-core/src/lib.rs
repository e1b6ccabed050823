// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Logoplace — core types, error definitions, configuration and the
// collaborator seams shared across all crates.

pub mod capability;
pub mod config;
pub mod error;
pub mod types;

pub use capability::{AssetFetcher, Persist, StorageRoute};
pub use config::{CornerBias, PlacementConfig, ServiceConfig};
pub use error::LogoplaceError;
pub use types::*;
