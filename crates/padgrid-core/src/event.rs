#![forbid(unsafe_code)]

//! Touch events delivered by the host.
//!
//! A [`TouchEvent`] always carries the complete set of pointers that are
//! down at the time of the event, plus the pointer that caused it. Hosts that
//! only report one pointer at a time can feed their notifications through a
//! [`PointerTracker`] to obtain full events.
//!
//! Coordinates are physical pixels; conversion to logical units happens in
//! the interaction driver via [`Viewport::to_logical`](crate::geometry::Viewport::to_logical).

use serde::{Deserialize, Serialize};

/// What happened to the acting pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    /// First pointer went down.
    Down,
    /// An additional pointer went down.
    PointerDown,
    /// One or more pointers moved.
    Move,
    /// A pointer went up while others remain down.
    PointerUp,
    /// The last pointer went up.
    Up,
    /// The gesture was aborted by the host.
    Cancel,
}

impl TouchPhase {
    /// Phases where the acting pointer is leaving the surface.
    #[inline]
    #[must_use]
    pub const fn is_release(self) -> bool {
        matches!(self, Self::PointerUp | Self::Up)
    }
}

/// One pointer position in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    #[inline]
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// A normalized touch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    /// Pointer responsible for this event.
    pub action: TouchPoint,
    /// Every pointer down at the time of the event, including a pointer that
    /// is being released.
    #[serde(default)]
    pub pointers: Vec<TouchPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, action: TouchPoint, pointers: Vec<TouchPoint>) -> Self {
        Self {
            phase,
            action,
            pointers,
        }
    }

    /// Event with a single pointer that is both the actor and the only pointer.
    pub fn single(phase: TouchPhase, id: u32, x: f32, y: f32) -> Self {
        let point = TouchPoint::new(id, x, y);
        Self::new(phase, point, vec![point])
    }

    /// Pointers that still count as touching the surface after this event.
    ///
    /// On release phases the acting pointer is excluded; on `Cancel` nothing
    /// is live.
    pub fn live_pointers(&self) -> impl Iterator<Item = &TouchPoint> + '_ {
        let released = self.phase.is_release().then_some(self.action.id);
        let cancelled = self.phase == TouchPhase::Cancel;
        self.pointers
            .iter()
            .filter(move |p| !cancelled && Some(p.id) != released)
    }
}

/// Builds full [`TouchEvent`]s from per-pointer notifications.
///
/// Guarantees:
/// - The first press on an idle tracker is reported as `Down`.
/// - Pressing an id that is already down overwrites its previous entry.
/// - Moves and releases of unknown pointers are dropped.
/// - Releasing the last pointer is reported as `Up`.
/// - `cancel` empties the tracker.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    pointers: Vec<TouchPoint>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointers currently down, in press order.
    #[must_use]
    pub fn pointers(&self) -> &[TouchPoint] {
        &self.pointers
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pointers.is_empty()
    }

    /// A pointer went down.
    pub fn press(&mut self, id: u32, x: f32, y: f32) -> TouchEvent {
        let point = TouchPoint::new(id, x, y);
        let phase = if self.pointers.is_empty() {
            TouchPhase::Down
        } else {
            TouchPhase::PointerDown
        };
        match self.pointers.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                crate::trace!(id, "pointer id reused while down");
                *existing = point;
            }
            None => self.pointers.push(point),
        }
        TouchEvent::new(phase, point, self.pointers.clone())
    }

    /// A known pointer moved. Returns `None` for unknown ids.
    pub fn moved(&mut self, id: u32, x: f32, y: f32) -> Option<TouchEvent> {
        let Some(existing) = self.pointers.iter_mut().find(|p| p.id == id) else {
            crate::trace!(id, "move for unknown pointer dropped");
            return None;
        };
        existing.x = x;
        existing.y = y;
        let point = *existing;
        Some(TouchEvent::new(TouchPhase::Move, point, self.pointers.clone()))
    }

    /// A known pointer went up. Returns `None` for unknown ids.
    pub fn release(&mut self, id: u32) -> Option<TouchEvent> {
        let Some(index) = self.pointers.iter().position(|p| p.id == id) else {
            crate::trace!(id, "release for unknown pointer dropped");
            return None;
        };
        let pointers = self.pointers.clone();
        let point = self.pointers.remove(index);
        let phase = if self.pointers.is_empty() {
            TouchPhase::Up
        } else {
            TouchPhase::PointerUp
        };
        Some(TouchEvent::new(phase, point, pointers))
    }

    /// The host aborted the gesture.
    pub fn cancel(&mut self) -> TouchEvent {
        let pointers = std::mem::take(&mut self.pointers);
        let action = pointers.first().copied().unwrap_or_default();
        TouchEvent::new(TouchPhase::Cancel, action, pointers)
    }
}
