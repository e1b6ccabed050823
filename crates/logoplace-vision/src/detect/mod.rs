// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection capabilities consumed by corner analysis — text presence and
// edge maps — plus the default implementations.

pub mod capability;
pub mod edges;
pub mod text;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use capability::{EdgeDetector, TextDetector};
pub use edges::CannyEdgeDetector;
pub use text::NoTextDetector;

#[cfg(feature = "ocr")]
pub use ocr::OcrTextDetector;
