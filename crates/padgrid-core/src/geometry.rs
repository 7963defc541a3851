#![forbid(unsafe_code)]

//! Geometric primitives for mapping a logical control grid onto a viewport.
//!
//! All coordinates here are *logical* units: physical pixels divided by the
//! display density (see [`Viewport::to_logical`]). The origin is the top-left
//! corner of the viewport.

use serde::{Deserialize, Serialize};

/// Grid width used when a layout asks for zero columns.
pub const DEFAULT_GRID_WIDTH: u16 = 4;
/// Grid height used when a layout asks for zero rows.
pub const DEFAULT_GRID_HEIGHT: u16 = 3;

/// A point in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn delta(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// An axis-aligned box in logical coordinates, used for hit testing and drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre of the rectangle.
    #[inline]
    pub fn centre(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Left/top edges are inclusive, right/bottom edges exclusive, so two
    /// adjacent cells never both claim a point on their shared edge.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Position of `point` relative to this rectangle, where `(0, 0)` is the
    /// top-left corner and `(1, 1)` the bottom-right. Clamped to `[0, 1]`.
    pub fn normalize(&self, point: Point) -> Point {
        let fx = if self.width > 0.0 {
            (point.x - self.x) / self.width
        } else {
            0.5
        };
        let fy = if self.height > 0.0 {
            (point.y - self.y) / self.height
        } else {
            0.5
        };
        Point::new(fx.clamp(0.0, 1.0), fy.clamp(0.0, 1.0))
    }

    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, local: Point) -> Point {
        Point::new(self.x + local.x * self.width, self.y + local.y * self.height)
    }

    /// Shrink the rectangle by `margin` on every side, never below zero size.
    pub fn inset(&self, margin: f32) -> Rect {
        let width = (self.width - 2.0 * margin).max(0.0);
        let height = (self.height - 2.0 * margin).max(0.0);
        Rect::new(
            self.x + (self.width - width) / 2.0,
            self.y + (self.height - height) / 2.0,
            width,
            height,
        )
    }
}

/// Logical grid dimensions, always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u16,
    height: u16,
}

impl GridSize {
    /// Create a grid size. A zero dimension is replaced by its default
    /// ([`DEFAULT_GRID_WIDTH`] / [`DEFAULT_GRID_HEIGHT`]).
    pub fn new(width: u16, height: u16) -> Self {
        let size = Self {
            width: if width == 0 { DEFAULT_GRID_WIDTH } else { width },
            height: if height == 0 {
                DEFAULT_GRID_HEIGHT
            } else {
                height
            },
        };
        if size.width != width || size.height != height {
            crate::debug!(
                requested_width = width,
                requested_height = height,
                width = size.width,
                height = size.height,
                "degenerate grid size corrected"
            );
        }
        size
    }

    /// Number of columns.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Physical description of the touch surface, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in physical pixels.
    pub width_px: f32,
    /// Height in physical pixels.
    pub height_px: f32,
    /// Physical pixels per logical unit.
    pub density: f32,
}

impl Viewport {
    /// Create a viewport description.
    pub const fn new(width_px: f32, height_px: f32, density: f32) -> Self {
        Self {
            width_px,
            height_px,
            density,
        }
    }

    /// Density actually used for conversions; non-positive or non-finite
    /// densities fall back to `1.0`.
    #[inline]
    pub fn scale(&self) -> f32 {
        if self.density.is_finite() && self.density > 0.0 {
            self.density
        } else {
            1.0
        }
    }

    /// Logical width.
    #[inline]
    pub fn logical_width(&self) -> f32 {
        self.width_px / self.scale()
    }

    /// Logical height.
    #[inline]
    pub fn logical_height(&self) -> f32 {
        self.height_px / self.scale()
    }

    /// Convert a physical pixel position into logical coordinates.
    #[inline]
    pub fn to_logical(&self, x_px: f32, y_px: f32) -> Point {
        let scale = self.scale();
        Point::new(x_px / scale, y_px / scale)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Per-frame mapping from grid cells to logical viewport coordinates.
///
/// Cheap to build; callers recompute it from the current [`Viewport`] for
/// every frame rather than holding it across resizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    grid: GridSize,
    viewport_width: f32,
    viewport_height: f32,
    cell_width: f32,
    cell_height: f32,
    landscape: bool,
}

impl GridGeometry {
    /// Build geometry for a logical viewport size.
    pub fn new(viewport_width: f32, viewport_height: f32, grid: GridSize, landscape: bool) -> Self {
        Self {
            grid,
            viewport_width,
            viewport_height,
            cell_width: viewport_width / f32::from(grid.width()),
            cell_height: viewport_height / f32::from(grid.height()),
            landscape,
        }
    }

    /// Build geometry from a physical viewport.
    pub fn from_viewport(viewport: &Viewport, grid: GridSize, landscape: bool) -> Self {
        Self::new(
            viewport.logical_width(),
            viewport.logical_height(),
            grid,
            landscape,
        )
    }

    #[inline]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    #[inline]
    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    #[inline]
    pub const fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    /// Logical width of one grid cell.
    #[inline]
    pub const fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Logical height of one grid cell.
    #[inline]
    pub const fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Whether the layout is drawn for a device held sideways.
    #[inline]
    pub const fn is_landscape(&self) -> bool {
        self.landscape
    }

    /// The whole viewport as a rectangle.
    #[inline]
    pub fn viewport_rect(&self) -> Rect {
        Rect::from_size(self.viewport_width, self.viewport_height)
    }

    /// Box covered by a grid-aligned placement.
    pub fn cell_rect(&self, cell_x: u16, cell_y: u16, span_x: u16, span_y: u16) -> Rect {
        Rect::new(
            f32::from(cell_x) * self.cell_width,
            f32::from(cell_y) * self.cell_height,
            f32::from(span_x) * self.cell_width,
            f32::from(span_y) * self.cell_height,
        )
    }

    /// Box covered by a free placement given as fractions of the viewport.
    pub fn free_rect(&self, x: f32, y: f32, span_x: f32, span_y: f32) -> Rect {
        Rect::new(
            x * self.viewport_width,
            y * self.viewport_height,
            span_x * self.viewport_width,
            span_y * self.viewport_height,
        )
    }
}
