#![forbid(unsafe_code)]

//! Multi-pointer dispatch.
//!
//! For every touch event the driver:
//!
//! 1. Computes [`GridGeometry`](padgrid_core::geometry::GridGeometry) from the
//!    current viewport. Nothing is cached between events.
//! 2. Opens a frame, which resets every item's per-frame latch.
//! 3. On release phases, tells items under the released pointer it is leaving.
//! 4. Feeds every live pointer, converted to logical units, to the items it
//!    hits. An item is pressed if any live pointer is inside it.
//! 5. Commits the frame.

use padgrid_core::event::{TouchEvent, TouchPhase};
use padgrid_core::geometry::Viewport;
use padgrid_layout::{FrameSummary, Layout};
use serde::Serialize;

/// Outcome of one processed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    /// Sequence number of the frame, starting at 1.
    pub frame: u64,
    pub phase: TouchPhase,
    /// Pointers still touching after the event.
    pub live_pointers: usize,
    #[serde(flatten)]
    pub summary: FrameSummary,
}

/// Runs the frame protocol for each incoming event.
#[derive(Debug, Clone, Default)]
pub struct InteractionDriver {
    frames: u64,
}

impl InteractionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Apply `event` to `layout`.
    pub fn process(
        &mut self,
        layout: &mut Layout,
        viewport: &Viewport,
        event: &TouchEvent,
    ) -> FrameReport {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "driver_process",
            phase = ?event.phase,
            pointers = event.pointers.len(),
            items = layout.len()
        );
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let geometry = layout.geometry(viewport);
        let mut frame = layout.begin_frame(geometry);

        if event.phase.is_release() {
            let point = viewport.to_logical(event.action.x, event.action.y);
            frame.record_exit(point);
        }

        let mut live_pointers = 0;
        for pointer in event.live_pointers() {
            frame.record_pointer(pointer.id, viewport.to_logical(pointer.x, pointer.y));
            live_pointers += 1;
        }

        let summary = frame.commit();
        self.frames += 1;

        padgrid_core::trace!(
            frame = self.frames,
            live_pointers,
            hits = summary.hits,
            active = summary.active,
            "event processed"
        );

        FrameReport {
            frame: self.frames,
            phase: event.phase,
            live_pointers,
            summary,
        }
    }
}
