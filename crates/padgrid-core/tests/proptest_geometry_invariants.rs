//! Property-based invariant tests for grid geometry.
//!
//! 1. Cells tile the viewport exactly: `cell_width * w == viewport_width`.
//! 2. Grid sizes are always strictly positive.
//! 3. Every point inside the viewport lands in exactly one grid cell.
//! 4. `normalize` stays within `[0, 1]` and inverts `denormalize`.
//! 5. Logical conversion never produces non-finite values for finite input.

use padgrid_core::geometry::{GridGeometry, GridSize, Point, Rect, Viewport};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn grid_strategy() -> impl Strategy<Value = (u16, u16)> {
    (1u16..=32, 1u16..=32)
}

fn viewport_strategy() -> impl Strategy<Value = (f32, f32)> {
    (1.0f32..4000.0, 1.0f32..4000.0)
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3 * b.abs().max(1.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Cells tile the viewport
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cells_tile_viewport((w, h) in grid_strategy(), (vw, vh) in viewport_strategy()) {
        let g = GridGeometry::new(vw, vh, GridSize::new(w, h), false);
        prop_assert!(close(g.cell_width() * f32::from(w), vw));
        prop_assert!(close(g.cell_height() * f32::from(h), vh));

        let full = g.cell_rect(0, 0, w, h);
        prop_assert!(close(full.width, vw));
        prop_assert!(close(full.height, vh));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Grid sizes are positive
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn grid_size_always_positive(w in any::<u16>(), h in any::<u16>()) {
        let size = GridSize::new(w, h);
        prop_assert!(size.width() >= 1);
        prop_assert!(size.height() >= 1);
        if w > 0 {
            prop_assert_eq!(size.width(), w);
        }
        if h > 0 {
            prop_assert_eq!(size.height(), h);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Points belong to exactly one cell
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn point_hits_exactly_one_cell(
        (w, h) in (1u16..=8, 1u16..=8),
        (vw, vh) in viewport_strategy(),
        fx in 0.0f32..0.999,
        fy in 0.0f32..0.999,
    ) {
        let g = GridGeometry::new(vw, vh, GridSize::new(w, h), false);
        let p = Point::new(fx * vw, fy * vh);
        let mut hits = 0;
        for cx in 0..w {
            for cy in 0..h {
                if g.cell_rect(cx, cy, 1, 1).contains(p) {
                    hits += 1;
                }
            }
        }
        // Float rounding at a shared edge can leave a point just outside both
        // neighbours, but never inside two of them.
        prop_assert!(hits <= 1, "point {:?} hit {} cells", p, hits);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. normalize / denormalize
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_is_bounded(
        (x, y, w, h) in (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..500.0, 1.0f32..500.0),
        (px, py) in (-2000.0f32..2000.0, -2000.0f32..2000.0),
    ) {
        let r = Rect::new(x, y, w, h);
        let n = r.normalize(Point::new(px, py));
        prop_assert!((0.0..=1.0).contains(&n.x));
        prop_assert!((0.0..=1.0).contains(&n.y));
    }

    #[test]
    fn normalize_inverts_denormalize(
        (x, y, w, h) in (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..500.0, 1.0f32..500.0),
        (u, v) in (0.0f32..=1.0, 0.0f32..=1.0),
    ) {
        let r = Rect::new(x, y, w, h);
        let back = r.normalize(r.denormalize(Point::new(u, v)));
        prop_assert!((back.x - u).abs() < 1e-3);
        prop_assert!((back.y - v).abs() < 1e-3);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Logical conversion stays finite
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn logical_conversion_is_finite(
        (wpx, hpx) in viewport_strategy(),
        density in prop_oneof![Just(0.0f32), Just(-1.0f32), Just(f32::NAN), 0.1f32..8.0],
        (px, py) in (0.0f32..4000.0, 0.0f32..4000.0),
    ) {
        let v = Viewport::new(wpx, hpx, density);
        let p = v.to_logical(px, py);
        prop_assert!(p.x.is_finite() && p.y.is_finite());
        prop_assert!(v.logical_width().is_finite());
        prop_assert!(v.logical_height().is_finite());
    }
}
