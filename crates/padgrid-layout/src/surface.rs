#![forbid(unsafe_code)]

//! The drawing collaborator.
//!
//! Items never touch pixels; they describe what to draw through [`Surface`],
//! which the host implements on top of its canvas. [`RecordingSurface`]
//! captures the calls for tests and replay tooling.

use padgrid_core::geometry::{Point, Rect};

use crate::style::Rgba;

/// Draw target supplied by the host. All coordinates are logical units.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32);

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32);

    fn circle(&mut self, centre: Point, radius: f32, color: Rgba);

    /// Draw `text` centred on `anchor`, rotated clockwise by `rotation`
    /// degrees around the anchor.
    fn text(&mut self, text: &str, anchor: Point, size: f32, rotation: f32, color: Rgba);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f32,
    },
    Circle {
        centre: Point,
        radius: f32,
        color: Rgba,
    },
    Text {
        text: String,
        anchor: Point,
        size: f32,
        rotation: f32,
        color: Rgba,
    },
}

/// A [`Surface`] that stores every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Labels drawn so far, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32) {
        self.ops.push(DrawOp::StrokeRect { rect, color, width });
    }

    fn line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn circle(&mut self, centre: Point, radius: f32, color: Rgba) {
        self.ops.push(DrawOp::Circle {
            centre,
            radius,
            color,
        });
    }

    fn text(&mut self, text: &str, anchor: Point, size: f32, rotation: f32, color: Rgba) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            anchor,
            size,
            rotation,
            color,
        });
    }
}
