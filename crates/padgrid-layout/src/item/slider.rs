#![forbid(unsafe_code)]

use padgrid_core::geometry::{Point, Rect};

use super::{Control, Encoded, HitSample, ItemFlags, Orientation, scale_axis, user_to_screen};
use crate::style::RenderStyle;
use crate::surface::Surface;

const CENTRE: Point = Point::new(0.5, 0.5);

/// A joystick-style analogue control.
///
/// Reports one or two axes in joystick convention (right and up positive).
/// With floating axes the knob springs back to the centre when released;
/// otherwise it stays where it was last touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    orientation: Orientation,
    floating_axes: bool,
    /// Knob position in the user's frame, `(0.5, 0.5)` is centred.
    position: Point,
    pending: Option<Point>,
    held: bool,
}

impl Slider {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            floating_axes: true,
            position: CENTRE,
            pending: None,
            held: false,
        }
    }

    #[must_use]
    pub fn with_floating_axes(mut self, floating_axes: bool) -> Self {
        self.floating_axes = floating_axes;
        self
    }

    pub(crate) fn set_floating_axes(&mut self, floating_axes: bool) {
        self.floating_axes = floating_axes;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn floating_axes(&self) -> bool {
        self.floating_axes
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Axis values in `[-1, 1]`; axes outside the orientation read `0`.
    pub fn axes(&self) -> (f32, f32) {
        let x = if self.orientation.has_x() {
            (self.position.x - 0.5) * 2.0
        } else {
            0.0
        };
        let y = if self.orientation.has_y() {
            (0.5 - self.position.y) * 2.0
        } else {
            0.0
        };
        (x, y)
    }

    /// Knob position in the user's frame, pinned to the centre on unused axes.
    fn knob(&self) -> Point {
        Point::new(
            if self.orientation.has_x() {
                self.position.x
            } else {
                0.5
            },
            if self.orientation.has_y() {
                self.position.y
            } else {
                0.5
            },
        )
    }
}

impl Control for Slider {
    fn on_pointer_enter(&mut self, sample: HitSample) {
        self.pending = Some(sample.user_point());
    }

    fn reset_latch(&mut self) {
        self.pending = None;
    }

    fn commit(&mut self) {
        match self.pending {
            Some(point) => {
                self.position = point;
                self.held = true;
            }
            None => {
                self.held = false;
                if self.floating_axes {
                    self.position = CENTRE;
                }
            }
        }
    }

    fn encode(&self) -> Encoded {
        let (x, y) = self.axes();
        Encoded::new(
            ItemFlags::SLIDER | self.orientation.flags(),
            scale_axis(x),
            scale_axis(y),
            0,
        )
    }

    fn is_active(&self) -> bool {
        self.held
    }

    fn draw(&self, surface: &mut dyn Surface, bounds: Rect, landscape: bool, style: &RenderStyle) {
        let to_bounds = |user: Point| bounds.denormalize(user_to_screen(user, landscape));
        if self.orientation.has_x() {
            surface.line(
                to_bounds(Point::new(0.0, 0.5)),
                to_bounds(Point::new(1.0, 0.5)),
                style.track,
                style.outline_width,
            );
        }
        if self.orientation.has_y() {
            surface.line(
                to_bounds(Point::new(0.5, 0.0)),
                to_bounds(Point::new(0.5, 1.0)),
                style.track,
                style.outline_width,
            );
        }
        let radius = bounds.width.min(bounds.height) * style.knob_ratio;
        surface.circle(to_bounds(self.knob()), radius, style.knob);
    }
}
