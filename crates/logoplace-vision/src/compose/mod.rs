// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compositing — resize policy and logo overlay.

pub mod compositor;
pub mod resize;

pub use compositor::{CompositeOutcome, Compositor};
pub use resize::{ImageResizer, LanczosResizer, ResizeMode};
