#![forbid(unsafe_code)]

//! Controls placed on the grid.
//!
//! Every control owns its own interaction state and follows the same
//! per-frame protocol, driven by [`Layout::begin_frame`](crate::Layout::begin_frame):
//!
//! 1. [`Control::reset_latch`] on every item.
//! 2. [`Control::on_pointer_exit`] for items under a released pointer.
//! 3. [`Control::on_pointer_enter`] once per live pointer hitting the item.
//! 4. [`Control::commit`] on every item.
//!
//! After the committed state has been read through [`Control::encode`],
//! [`Control::settle`] consumes one-shot state so the next frame starts clean.

pub mod button;
pub mod panel;
pub mod slider;
pub mod toggle;

use std::fmt;

use bitflags::bitflags;
use padgrid_core::geometry::{GridGeometry, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::style::RenderStyle;
use crate::surface::Surface;

use button::Button;
use panel::TouchPanel;
use slider::Slider;
use toggle::ToggleButton;

/// Full-scale magnitude of an encoded axis value.
pub const AXIS_MAX: i32 = 16384;

/// Text size used when a label asks for size `0`.
pub const DEFAULT_TEXT_SIZE: u16 = 14;

bitflags! {
    /// Describes what an [`Encoded`] record contains.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ItemFlags: u32 {
        const BUTTON     = 0x01;
        const TOGGLE     = 0x02;
        const SLIDER     = 0x04;
        const PANEL      = 0x08;
        const HAS_X_AXIS = 0x10;
        const HAS_Y_AXIS = 0x20;
        /// Button reports a single pulse per press.
        const RESET      = 0x40;
        /// Panel reports positions rather than deltas.
        const ABSOLUTE   = 0x80;
    }
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Committed state of one item, ready for transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Encoded {
    pub flags: ItemFlags,
    pub data1: i32,
    pub data2: i32,
    pub data3: i32,
}

impl Encoded {
    #[inline]
    pub const fn new(flags: ItemFlags, data1: i32, data2: i32, data3: i32) -> Self {
        Self {
            flags,
            data1,
            data2,
            data3,
        }
    }
}

/// Scale a value in `[-1, 1]` (or `[0, 1]`) to the encoded axis range.
#[inline]
pub(crate) fn scale_axis(value: f32) -> i32 {
    (value.clamp(-1.0, 1.0) * AXIS_MAX as f32).round() as i32
}

/// Axes a slider or panel reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    X,
    Y,
    #[default]
    Both,
}

impl Orientation {
    #[inline]
    pub const fn has_x(self) -> bool {
        matches!(self, Self::X | Self::Both)
    }

    #[inline]
    pub const fn has_y(self) -> bool {
        matches!(self, Self::Y | Self::Both)
    }

    /// Axis flags for an encoded record.
    pub fn flags(self) -> ItemFlags {
        let mut flags = ItemFlags::empty();
        if self.has_x() {
            flags |= ItemFlags::HAS_X_AXIS;
        }
        if self.has_y() {
            flags |= ItemFlags::HAS_Y_AXIS;
        }
        flags
    }
}

/// Errors raised while building layout items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// A free placement was given a span that is zero, negative or not finite.
    InvalidSpan { span_x: f32, span_y: f32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpan { span_x, span_y } => write!(
                f,
                "free placement span must be finite and positive (got {span_x} x {span_y})"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Where an item sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Aligned to grid cells.
    Grid {
        cell_x: u16,
        cell_y: u16,
        span_x: u16,
        span_y: u16,
    },
    /// Positioned in fractions of the viewport.
    Free {
        x: f32,
        y: f32,
        span_x: f32,
        span_y: f32,
    },
}

impl Placement {
    /// Grid-aligned placement. Zero spans are raised to one cell.
    pub fn grid(cell_x: u16, cell_y: u16, span_x: u16, span_y: u16) -> Self {
        Self::Grid {
            cell_x,
            cell_y,
            span_x: span_x.max(1),
            span_y: span_y.max(1),
        }
    }

    /// Free placement in normalized viewport coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpan`] unless both spans are finite and
    /// strictly positive.
    pub fn free(x: f32, y: f32, span_x: f32, span_y: f32) -> Result<Self, LayoutError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(span_x) || !valid(span_y) {
            return Err(LayoutError::InvalidSpan { span_x, span_y });
        }
        Ok(Self::Free {
            x,
            y,
            span_x,
            span_y,
        })
    }

    /// Box covered by this placement in logical units.
    pub fn bounds(&self, geometry: &GridGeometry) -> Rect {
        match *self {
            Self::Grid {
                cell_x,
                cell_y,
                span_x,
                span_y,
            } => geometry.cell_rect(cell_x, cell_y, span_x, span_y),
            Self::Free {
                x,
                y,
                span_x,
                span_y,
            } => geometry.free_rect(x, y, span_x, span_y),
        }
    }
}

/// A pointer hit, as seen by the item it landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSample {
    /// Position inside the item box, `(0, 0)` top-left to `(1, 1)` bottom-right.
    pub local: Point,
    pub landscape: bool,
    /// Id of the pointer that produced the hit, when known.
    pub pointer: Option<u32>,
}

impl HitSample {
    pub const fn new(local: Point, landscape: bool) -> Self {
        Self {
            local,
            landscape,
            pointer: None,
        }
    }

    #[must_use]
    pub const fn with_pointer(mut self, id: u32) -> Self {
        self.pointer = Some(id);
        self
    }

    /// Position in the user's frame of reference: `x` grows to the user's
    /// right, `y` grows towards the user.
    ///
    /// In landscape the device is held a quarter turn, so the screen's
    /// vertical axis becomes the user's horizontal one.
    pub fn user_point(&self) -> Point {
        if self.landscape {
            Point::new(self.local.y, 1.0 - self.local.x)
        } else {
            self.local
        }
    }
}

/// Inverse of [`HitSample::user_point`].
pub(crate) fn user_to_screen(user: Point, landscape: bool) -> Point {
    if landscape {
        Point::new(1.0 - user.y, user.x)
    } else {
        user
    }
}

/// Behaviour shared by every control.
pub trait Control {
    /// A live pointer is inside the item this frame.
    fn on_pointer_enter(&mut self, sample: HitSample);

    /// A pointer inside the item is being released.
    fn on_pointer_exit(&mut self) {}

    /// Start of a frame: forget which pointers were inside.
    fn reset_latch(&mut self);

    /// End of a frame: fold this frame's hits into committed state.
    fn commit(&mut self);

    /// Advance one-shot state after the committed state has been published.
    fn settle(&mut self) {}

    /// Committed state. Pure read.
    fn encode(&self) -> Encoded;

    /// Whether the item should be drawn as selected.
    fn is_active(&self) -> bool;

    /// Draw the variant-specific body inside `bounds`.
    fn draw(&self, surface: &mut dyn Surface, bounds: Rect, landscape: bool, style: &RenderStyle);
}

/// Closed set of control variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Button(Button),
    Toggle(ToggleButton),
    Slider(Slider),
    Panel(TouchPanel),
}

impl ItemKind {
    fn as_control(&self) -> &dyn Control {
        match self {
            Self::Button(b) => b,
            Self::Toggle(t) => t,
            Self::Slider(s) => s,
            Self::Panel(p) => p,
        }
    }

    fn as_control_mut(&mut self) -> &mut dyn Control {
        match self {
            Self::Button(b) => b,
            Self::Toggle(t) => t,
            Self::Slider(s) => s,
            Self::Panel(p) => p,
        }
    }

    /// Short lowercase name of the variant.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Button(_) => "button",
            Self::Toggle(_) => "toggle",
            Self::Slider(_) => "slider",
            Self::Panel(_) => "panel",
        }
    }
}

impl From<Button> for ItemKind {
    fn from(value: Button) -> Self {
        Self::Button(value)
    }
}

impl From<ToggleButton> for ItemKind {
    fn from(value: ToggleButton) -> Self {
        Self::Toggle(value)
    }
}

impl From<Slider> for ItemKind {
    fn from(value: Slider) -> Self {
        Self::Slider(value)
    }
}

impl From<TouchPanel> for ItemKind {
    fn from(value: TouchPanel) -> Self {
        Self::Panel(value)
    }
}

/// A placed control.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    placement: Placement,
    kind: ItemKind,
}

impl Item {
    pub fn new(placement: Placement, kind: impl Into<ItemKind>) -> Self {
        Self {
            placement,
            kind: kind.into(),
        }
    }

    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[inline]
    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    /// Box covered by this item in logical units.
    #[inline]
    pub fn bounds(&self, geometry: &GridGeometry) -> Rect {
        self.placement.bounds(geometry)
    }

    /// Whether `point` (logical units) lies inside the item's box.
    #[inline]
    pub fn hit_test(&self, point: Point, geometry: &GridGeometry) -> bool {
        self.bounds(geometry).contains(point)
    }

    pub fn on_pointer_enter(&mut self, sample: HitSample) {
        self.kind.as_control_mut().on_pointer_enter(sample);
    }

    pub fn on_pointer_exit(&mut self) {
        self.kind.as_control_mut().on_pointer_exit();
    }

    pub fn reset_latch(&mut self) {
        self.kind.as_control_mut().reset_latch();
    }

    pub fn commit(&mut self) {
        self.kind.as_control_mut().commit();
    }

    pub fn settle(&mut self) {
        self.kind.as_control_mut().settle();
    }

    pub fn encode(&self) -> Encoded {
        self.kind.as_control().encode()
    }

    pub fn is_active(&self) -> bool {
        self.kind.as_control().is_active()
    }

    /// Draw outline and fill, then the variant body.
    pub fn draw(&self, surface: &mut dyn Surface, geometry: &GridGeometry, style: &RenderStyle) {
        let bounds = self.bounds(geometry).inset(style.margin / 2.0);
        let fill = style.fill_for(self.is_active());
        if fill.a() > 0 {
            surface.fill_rect(bounds, fill);
        }
        surface.stroke_rect(bounds, style.outline, style.outline_width);
        self.kind
            .as_control()
            .draw(surface, bounds, geometry.is_landscape(), style);
    }
}

/// Draw a centred label, rotated a quarter turn in landscape.
pub(crate) fn draw_label(
    surface: &mut dyn Surface,
    text: &str,
    text_size: u16,
    bounds: Rect,
    landscape: bool,
    style: &RenderStyle,
) {
    let size = f32::from(resolve_text_size(text_size)) * style.text_scale;
    let rotation = if landscape { 90.0 } else { 0.0 };
    surface.text(text, bounds.centre(), size, rotation, style.text);
}

/// `0` means "use the default size".
#[inline]
pub const fn resolve_text_size(text_size: u16) -> u16 {
    if text_size == 0 {
        DEFAULT_TEXT_SIZE
    } else {
        text_size
    }
}
