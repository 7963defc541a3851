#![forbid(unsafe_code)]

use padgrid_core::geometry::Rect;

use super::{Control, Encoded, HitSample, ItemFlags, draw_label};
use crate::style::RenderStyle;
use crate::surface::Surface;

/// A latching button that flips on every new press.
///
/// Only the rising edge counts: a press that stays down, moves around, or is
/// joined by more pointers flips the latch once.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleButton {
    text: String,
    text_size: u16,
    latched: bool,
    hit_this_frame: bool,
    hit_last_frame: bool,
}

impl ToggleButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_size: 0,
            latched: false,
            hit_this_frame: false,
            hit_last_frame: false,
        }
    }

    #[must_use]
    pub fn with_text_size(mut self, text_size: u16) -> Self {
        self.text_size = text_size;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_size(&self) -> u16 {
        self.text_size
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }
}

impl Control for ToggleButton {
    fn on_pointer_enter(&mut self, _sample: HitSample) {
        if !self.hit_this_frame && !self.hit_last_frame {
            self.latched = !self.latched;
        }
        self.hit_this_frame = true;
    }

    fn on_pointer_exit(&mut self) {
        self.hit_this_frame = false;
    }

    fn reset_latch(&mut self) {
        self.hit_this_frame = false;
    }

    fn commit(&mut self) {
        self.hit_last_frame = self.hit_this_frame;
    }

    fn encode(&self) -> Encoded {
        Encoded::new(ItemFlags::TOGGLE, i32::from(self.latched), 0, 0)
    }

    fn is_active(&self) -> bool {
        self.latched
    }

    fn draw(&self, surface: &mut dyn Surface, bounds: Rect, landscape: bool, style: &RenderStyle) {
        draw_label(surface, &self.text, self.text_size, bounds, landscape, style);
    }
}
