#![forbid(unsafe_code)]

use padgrid_core::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::{Control, Encoded, HitSample, ItemFlags, Orientation, scale_axis, user_to_screen};
use crate::style::RenderStyle;
use crate::surface::Surface;

/// How a [`TouchPanel`] reports movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelMode {
    /// Per-frame movement, like a trackpad.
    #[default]
    Relative,
    /// Last touched position, like a tablet.
    Absolute,
}

/// A trackpad-like surface.
///
/// Values use mouse convention: right and down are positive. In relative
/// mode `data1`/`data2` carry the movement since the previous frame; in
/// absolute mode they carry the last touched position in `[0, AXIS_MAX]`.
/// `data3` is `1` while the panel is being touched.
///
/// The panel follows one pointer at a time: the one it followed last frame
/// if still present, otherwise the first to land on it. A frame where the
/// followed pointer changes reports no movement.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchPanel {
    orientation: Orientation,
    mode: PanelMode,
    pending: Option<(Option<u32>, Point)>,
    current: Option<Point>,
    previous: Option<Point>,
    tracked: Option<u32>,
    /// Most recent touch in the user's frame; kept after release.
    last: Point,
    delta: Point,
}

impl TouchPanel {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            mode: PanelMode::Relative,
            pending: None,
            current: None,
            previous: None,
            tracked: None,
            last: Point::new(0.5, 0.5),
            delta: Point::default(),
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PanelMode) -> Self {
        self.mode = mode;
        self
    }

    pub(crate) fn set_mode(&mut self, mode: PanelMode) {
        self.mode = mode;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn is_touched(&self) -> bool {
        self.current.is_some()
    }

    /// Movement committed on the last frame, in fractions of the panel.
    pub fn delta(&self) -> Point {
        self.delta
    }
}

impl Control for TouchPanel {
    fn on_pointer_enter(&mut self, sample: HitSample) {
        let keep = match self.pending {
            None => false,
            Some((pending, _)) => {
                pending == self.tracked || sample.pointer != self.tracked
            }
        };
        if !keep {
            self.pending = Some((sample.pointer, sample.user_point()));
        }
    }

    fn reset_latch(&mut self) {
        self.pending = None;
    }

    fn commit(&mut self) {
        let pointer = self.pending.and_then(|(id, _)| id);
        let same_pointer = pointer == self.tracked;
        self.previous = self.current;
        self.current = self.pending.map(|(_, point)| point);
        self.tracked = pointer;
        self.delta = match (self.previous, self.current) {
            (Some(prev), Some(cur)) if same_pointer => cur.delta(prev),
            _ => Point::default(),
        };
        if let Some(cur) = self.current {
            self.last = cur;
        }
    }

    fn encode(&self) -> Encoded {
        let mut flags = ItemFlags::PANEL | self.orientation.flags();
        let (x, y) = match self.mode {
            PanelMode::Relative => (self.delta.x, self.delta.y),
            PanelMode::Absolute => {
                flags |= ItemFlags::ABSOLUTE;
                (self.last.x, self.last.y)
            }
        };
        Encoded::new(
            flags,
            if self.orientation.has_x() {
                scale_axis(x)
            } else {
                0
            },
            if self.orientation.has_y() {
                scale_axis(y)
            } else {
                0
            },
            i32::from(self.is_touched()),
        )
    }

    fn is_active(&self) -> bool {
        self.is_touched()
    }

    fn draw(&self, surface: &mut dyn Surface, bounds: Rect, landscape: bool, style: &RenderStyle) {
        if let Some(cur) = self.current {
            let centre = bounds.denormalize(user_to_screen(cur, landscape));
            let radius = bounds.width.min(bounds.height) * style.knob_ratio / 2.0;
            surface.circle(centre, radius, style.marker);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AXIS_MAX;

    fn frame(panel: &mut TouchPanel, hit: Option<(f32, f32)>) -> Encoded {
        panel.reset_latch();
        if let Some((u, v)) = hit {
            panel.on_pointer_enter(HitSample::new(Point::new(u, v), false));
        }
        panel.commit();
        panel.encode()
    }

    #[test]
    fn relative_reports_per_frame_delta() {
        let mut p = TouchPanel::new(Orientation::Both);
        let e = frame(&mut p, Some((0.25, 0.25)));
        assert_eq!((e.data1, e.data2, e.data3), (0, 0, 1));
        let e = frame(&mut p, Some((0.5, 0.75)));
        assert_eq!((e.data1, e.data2), (AXIS_MAX / 4, AXIS_MAX / 2));
        let e = frame(&mut p, Some((0.5, 0.75)));
        assert_eq!((e.data1, e.data2), (0, 0));
        let e = frame(&mut p, None);
        assert_eq!((e.data1, e.data2, e.data3), (0, 0, 0));
    }

    #[test]
    fn new_touch_does_not_jump() {
        let mut p = TouchPanel::new(Orientation::Both);
        frame(&mut p, Some((0.1, 0.1)));
        frame(&mut p, None);
        let e = frame(&mut p, Some((0.9, 0.9)));
        assert_eq!((e.data1, e.data2), (0, 0));
    }

    fn pointer_frame(panel: &mut TouchPanel, hits: &[(u32, f32, f32)]) -> Encoded {
        panel.reset_latch();
        for &(id, u, v) in hits {
            panel.on_pointer_enter(HitSample::new(Point::new(u, v), false).with_pointer(id));
        }
        panel.commit();
        panel.encode()
    }

    #[test]
    fn follows_first_pointer_while_others_come_and_go() {
        let mut p = TouchPanel::new(Orientation::Both);
        pointer_frame(&mut p, &[(0, 0.1, 0.1)]);
        let e = pointer_frame(&mut p, &[(0, 0.1, 0.1), (1, 0.9, 0.9)]);
        assert_eq!((e.data1, e.data2, e.data3), (0, 0, 1));
        // Order of hits does not matter once a pointer is followed.
        let e = pointer_frame(&mut p, &[(1, 0.9, 0.9), (0, 0.2, 0.1)]);
        assert_eq!((e.data1, e.data2), (AXIS_MAX / 10, 0));
        let e = pointer_frame(&mut p, &[(0, 0.2, 0.1)]);
        assert_eq!((e.data1, e.data2), (0, 0));
    }

    #[test]
    fn handover_reports_no_movement() {
        let mut p = TouchPanel::new(Orientation::Both);
        pointer_frame(&mut p, &[(0, 0.1, 0.1), (1, 0.9, 0.9)]);
        let e = pointer_frame(&mut p, &[(1, 0.9, 0.9)]);
        assert_eq!((e.data1, e.data2, e.data3), (0, 0, 1));
        let e = pointer_frame(&mut p, &[(1, 0.8, 0.9)]);
        assert_eq!((e.data1, e.data2), (-AXIS_MAX / 10, 0));
    }

    #[test]
    fn absolute_reports_last_position() {
        let mut p = TouchPanel::new(Orientation::Both).with_mode(PanelMode::Absolute);
        let e = frame(&mut p, Some((0.25, 1.0)));
        assert!(e.flags.contains(ItemFlags::ABSOLUTE));
        assert_eq!((e.data1, e.data2, e.data3), (AXIS_MAX / 4, AXIS_MAX, 1));
        let e = frame(&mut p, None);
        assert_eq!((e.data1, e.data2, e.data3), (AXIS_MAX / 4, AXIS_MAX, 0));
    }

    #[test]
    fn orientation_masks_axes() {
        let mut p = TouchPanel::new(Orientation::Y).with_mode(PanelMode::Absolute);
        let e = frame(&mut p, Some((1.0, 0.5)));
        assert_eq!((e.data1, e.data2), (0, AXIS_MAX / 2));
        assert_eq!(e.flags, ItemFlags::PANEL | ItemFlags::HAS_Y_AXIS | ItemFlags::ABSOLUTE);
    }
}
