// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Logoplace.
//
// Admission outcomes (no corner, too little space, low confidence) are not
// errors; they travel as `PlacementFailure` inside a `PlacementDecision`.

use thiserror::Error;

/// Top-level error type for all Logoplace operations.
#[derive(Debug, Error)]
pub enum LogoplaceError {
    // -- Asset retrieval --
    #[error("asset fetch failed: {0}")]
    AssetFetch(String),

    // -- Image codec --
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    #[error("image encode failed: {0}")]
    ImageEncode(String),

    // -- Detection capabilities --
    #[error("text detection failed: {0}")]
    TextDetection(String),

    #[error("edge detection failed: {0}")]
    EdgeDetection(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    // -- Composition --
    #[error("resize failed: {0}")]
    Resize(String),

    #[error("composition failed: {0}")]
    Composition(String),

    // -- Storage / persistence --
    #[error("not a storage location: {0}")]
    InvalidStorageReference(String),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LogoplaceError>;
