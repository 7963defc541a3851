#![forbid(unsafe_code)]

//! Layout model for padgrid: controls, their per-frame interaction state,
//! and the drawing collaborator they render through.

pub mod item;
pub mod layout;
pub mod mode;
pub mod style;
pub mod surface;

pub use item::{
    AXIS_MAX, Control, DEFAULT_TEXT_SIZE, Encoded, HitSample, Item, ItemFlags, ItemKind,
    LayoutError, Orientation, Placement,
};
pub use item::button::Button;
pub use item::panel::{PanelMode, TouchPanel};
pub use item::slider::Slider;
pub use item::toggle::ToggleButton;
pub use layout::{ExtraDetail, FrameSummary, ItemOptions, Layout, LayoutFrame};
pub use mode::{Mode, ModeSpec};
pub use style::{RenderStyle, Rgba};
pub use surface::{DrawOp, RecordingSurface, Surface};
