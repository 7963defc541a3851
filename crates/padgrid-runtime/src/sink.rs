#![forbid(unsafe_code)]

//! Collaborators a [`ControlSession`](crate::ControlSession) talks to.

use std::cell::Cell;

use padgrid_core::geometry::Viewport;
use padgrid_layout::{Encoded, Layout, Mode};

/// Supplies the current physical viewport.
pub trait ViewportProvider {
    fn viewport(&self) -> Viewport;
}

impl ViewportProvider for Viewport {
    fn viewport(&self) -> Viewport {
        *self
    }
}

/// A viewport the host can resize between events.
impl ViewportProvider for Cell<Viewport> {
    fn viewport(&self) -> Viewport {
        self.get()
    }
}

impl<T: ViewportProvider + ?Sized> ViewportProvider for &T {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }
}

/// Receives fire-and-forget redraw requests.
///
/// The session only holds a weak reference, so the owner of the drawing
/// surface may go away at any time.
pub trait RedrawSink {
    fn request_redraw(&self);
}

/// Receives the committed layout after every processed event.
pub trait LayoutPublisher {
    fn publish(&mut self, mode: Mode, layout: &Layout);
}

impl<F> LayoutPublisher for F
where
    F: FnMut(Mode, &Layout),
{
    fn publish(&mut self, mode: Mode, layout: &Layout) {
        self(mode, layout);
    }
}

/// Keeps the encoded form of every published frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingPublisher {
    frames: Vec<(Mode, Vec<Encoded>)>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[(Mode, Vec<Encoded>)] {
        &self.frames
    }

    /// Encoded items of the most recent publish.
    pub fn last(&self) -> Option<&[Encoded]> {
        self.frames.last().map(|(_, items)| items.as_slice())
    }

    /// `data1` of item `index` across every publish.
    pub fn data1_history(&self, index: usize) -> Vec<i32> {
        self.frames
            .iter()
            .filter_map(|(_, items)| items.get(index).map(|e| e.data1))
            .collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl LayoutPublisher for RecordingPublisher {
    fn publish(&mut self, mode: Mode, layout: &Layout) {
        self.frames.push((mode, layout.encode()));
    }
}

/// Counts redraw requests.
#[derive(Debug, Default)]
pub struct RedrawCounter {
    count: Cell<usize>,
}

impl RedrawCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }
}

impl RedrawSink for RedrawCounter {
    fn request_redraw(&self) {
        self.count.set(self.count.get() + 1);
    }
}
