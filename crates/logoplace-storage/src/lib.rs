// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// logoplace-storage — where composites end up.
//
// The router tries an S3 object next to the original asset first and falls
// back to a local output directory. The local store also owns cleanup of the
// files it wrote.

pub mod local;
pub mod router;
pub mod s3;

pub use local::{CleanupReport, LocalStore};
pub use router::StorageRouter;
pub use s3::{ObjectStore, S3Location, S3ObjectStore, composite_key};
