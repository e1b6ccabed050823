// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed corner partition: each corner spans one third of the image along both
// axes, measured from its two nearest edges. Integer division, no rounding
// correction.

use logoplace_core::{Bounds, Corner, CornerRegion};

/// Bounding box of `corner` in a `width` x `height` image.
pub fn corner_region(width: u32, height: u32, corner: Corner) -> CornerRegion {
    let third_w = width / 3;
    let third_h = height / 3;
    let two_thirds_w = (width as u64 * 2 / 3) as u32;
    let two_thirds_h = (height as u64 * 2 / 3) as u32;

    let (x1, x2) = if corner.is_right() {
        (two_thirds_w, width)
    } else {
        (0, third_w)
    };
    let (y1, y2) = if corner.is_bottom() {
        (two_thirds_h, height)
    } else {
        (0, third_h)
    };

    CornerRegion {
        corner,
        bounds: Bounds { x1, y1, x2, y2 },
    }
}

/// All four regions in evaluation order.
pub fn corner_regions(width: u32, height: u32) -> [CornerRegion; 4] {
    Corner::ALL.map(|corner| corner_region(width, height, corner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_of_800_by_600() {
        let [tl, tr, bl, br] = corner_regions(800, 600);
        assert_eq!(tl.bounds, Bounds { x1: 0, y1: 0, x2: 266, y2: 200 });
        assert_eq!(tr.bounds, Bounds { x1: 533, y1: 0, x2: 800, y2: 200 });
        assert_eq!(bl.bounds, Bounds { x1: 0, y1: 400, x2: 266, y2: 600 });
        assert_eq!(br.bounds, Bounds { x1: 533, y1: 400, x2: 800, y2: 600 });
        assert_eq!(br.corner, Corner::BottomRight);
    }

    #[test]
    fn far_regions_can_be_wider_than_near_ones() {
        // 10 / 3 = 3 but 10 - 10 * 2 / 3 = 4.
        let tl = corner_region(10, 10, Corner::TopLeft);
        let br = corner_region(10, 10, Corner::BottomRight);
        assert_eq!(tl.bounds.width(), 3);
        assert_eq!(br.bounds.width(), 4);
    }

    #[test]
    fn tiny_image_has_empty_near_regions() {
        let tl = corner_region(2, 2, Corner::TopLeft);
        assert!(tl.bounds.is_empty());
        let br = corner_region(2, 2, Corner::BottomRight);
        assert_eq!(br.bounds, Bounds { x1: 1, y1: 1, x2: 2, y2: 2 });
    }

    #[test]
    fn zero_sized_image() {
        for region in corner_regions(0, 0) {
            assert!(region.bounds.is_empty());
        }
    }
}
