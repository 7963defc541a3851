#![forbid(unsafe_code)]

use padgrid_core::geometry::Rect;

use super::{Control, Encoded, HitSample, ItemFlags, draw_label};
use crate::style::RenderStyle;
use crate::surface::Surface;

/// A momentary push button.
///
/// A plain button reports pressed while any pointer is on it. A *reset*
/// button reports a single pulse per press: it is pressed on the frame the
/// press begins and released afterwards, however long it is held.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    text: String,
    text_size: u16,
    reset: bool,
    committed: bool,
    pending: bool,
    one_shot: bool,
    held_last_frame: bool,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_size: 0,
            reset: false,
            committed: false,
            pending: false,
            one_shot: false,
            held_last_frame: false,
        }
    }

    #[must_use]
    pub fn with_text_size(mut self, text_size: u16) -> Self {
        self.text_size = text_size;
        self
    }

    #[must_use]
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Requested text size; `0` means default.
    pub fn text_size(&self) -> u16 {
        self.text_size
    }

    pub fn is_reset(&self) -> bool {
        self.reset
    }

    pub fn is_pressed(&self) -> bool {
        self.committed
    }
}

impl Control for Button {
    fn on_pointer_enter(&mut self, _sample: HitSample) {
        if self.reset && !self.pending && !self.held_last_frame {
            self.one_shot = true;
        }
        self.pending = true;
    }

    fn reset_latch(&mut self) {
        self.pending = false;
    }

    fn commit(&mut self) {
        self.committed = self.one_shot || (self.pending && !self.reset);
        self.held_last_frame = self.pending;
    }

    fn settle(&mut self) {
        if self.one_shot {
            self.one_shot = false;
            self.committed = false;
        }
    }

    fn encode(&self) -> Encoded {
        let mut flags = ItemFlags::BUTTON;
        if self.reset {
            flags |= ItemFlags::RESET;
        }
        Encoded::new(flags, i32::from(self.committed), 0, 0)
    }

    fn is_active(&self) -> bool {
        self.committed || self.pending
    }

    fn draw(&self, surface: &mut dyn Surface, bounds: Rect, landscape: bool, style: &RenderStyle) {
        draw_label(surface, &self.text, self.text_size, bounds, landscape, style);
    }
}
