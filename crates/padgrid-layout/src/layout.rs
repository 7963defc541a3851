#![forbid(unsafe_code)]

//! Ordered collections of items and the two-phase frame protocol.
//!
//! # Frame protocol
//!
//! ```ignore
//! let mut frame = layout.begin_frame(geometry);   // reset_latch on every item
//! frame.record_exit(released_point);              // optional
//! for p in live { frame.record_pointer(p.id, p.at); } // on_pointer_enter on hits
//! let summary = frame.commit();                   // commit on every item
//! ```
//!
//! Exits must come before any live pointer. A late exit would clear the
//! latch of an item another pointer still holds, so it is dropped.
//!
//! Item order is draw order and hit-test order. Overlapping items are all
//! eligible for the same pointer; there is no capture.

use padgrid_core::geometry::{GridGeometry, GridSize, Point, Viewport};
use serde::{Deserialize, Serialize};

use crate::item::panel::PanelMode;
use crate::item::{Encoded, HitSample, Item, ItemKind};
use crate::style::RenderStyle;
use crate::surface::Surface;

/// Title used when a layout does not name itself.
pub const DEFAULT_TITLE: &str = "Custom";
/// Description used when a layout does not describe itself.
pub const DEFAULT_DESCRIPTION: &str = "Custom layout";

/// Secondary modifier on a layout's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraDetail {
    #[default]
    None,
    /// Panels report absolute positions.
    MouseAbsolute,
    /// The layout is meant to be used like a laptop trackpad.
    MouseTrackpad,
}

/// Item settings applied once a session takes ownership of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOptions {
    /// Sliders recentre when released.
    pub floating_axes: bool,
    pub panel_mode: PanelMode,
}

impl Default for ItemOptions {
    fn default() -> Self {
        Self {
            floating_axes: true,
            panel_mode: PanelMode::Relative,
        }
    }
}

impl ItemOptions {
    /// Options for a layout with the given extra detail.
    pub fn for_layout(extra_detail: ExtraDetail, floating_axes: bool) -> Self {
        Self {
            floating_axes,
            panel_mode: match extra_detail {
                ExtraDetail::MouseAbsolute => PanelMode::Absolute,
                ExtraDetail::None | ExtraDetail::MouseTrackpad => PanelMode::Relative,
            },
        }
    }
}

/// An ordered set of controls plus metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    title: String,
    description: String,
    grid: GridSize,
    landscape: bool,
    extra_detail: ExtraDetail,
    items: Vec<Item>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(GridSize::default())
    }
}

impl Layout {
    pub fn new(grid: GridSize) -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            description: DEFAULT_DESCRIPTION.to_owned(),
            grid,
            landscape: false,
            extra_detail: ExtraDetail::None,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.landscape = landscape;
        self
    }

    #[must_use]
    pub fn with_extra_detail(mut self, extra_detail: ExtraDetail) -> Self {
        self.extra_detail = extra_detail;
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Append an item on top of the existing ones.
    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn is_landscape(&self) -> bool {
        self.landscape
    }

    pub fn extra_detail(&self) -> ExtraDetail {
        self.extra_detail
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order. Restartable and read-only.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Geometry of this layout on `viewport`.
    pub fn geometry(&self, viewport: &Viewport) -> GridGeometry {
        GridGeometry::from_viewport(viewport, self.grid, self.landscape)
    }

    /// Apply session-level item settings.
    pub fn configure(&mut self, options: &ItemOptions) {
        for item in &mut self.items {
            match item.kind_mut() {
                ItemKind::Slider(slider) => slider.set_floating_axes(options.floating_axes),
                ItemKind::Panel(panel) => panel.set_mode(options.panel_mode),
                ItemKind::Button(_) | ItemKind::Toggle(_) => {}
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            title = %self.title,
            floating_axes = options.floating_axes,
            panel_mode = ?options.panel_mode,
            "layout configured"
        );
    }

    /// Start a frame: every item forgets last frame's hits.
    #[must_use = "a frame must be committed for its hits to take effect"]
    pub fn begin_frame(&mut self, geometry: GridGeometry) -> LayoutFrame<'_> {
        for item in &mut self.items {
            item.reset_latch();
        }
        LayoutFrame {
            layout: self,
            geometry,
            hits: 0,
            exits: 0,
            pointers: 0,
        }
    }

    /// Consume one-shot state after the committed frame has been published.
    pub fn settle(&mut self) {
        for item in &mut self.items {
            item.settle();
        }
    }

    /// Committed state of every item, in item order.
    pub fn encode(&self) -> Vec<Encoded> {
        self.items.iter().map(Item::encode).collect()
    }

    /// Draw background and every item in order.
    pub fn draw(&self, surface: &mut dyn Surface, geometry: &GridGeometry, style: &RenderStyle) {
        surface.fill_rect(geometry.viewport_rect(), style.background);
        for item in &self.items {
            item.draw(surface, geometry, style);
        }
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An open frame on a [`Layout`].
///
/// Created by [`Layout::begin_frame`]; finish it with [`commit`](Self::commit).
#[derive(Debug)]
pub struct LayoutFrame<'a> {
    layout: &'a mut Layout,
    geometry: GridGeometry,
    hits: usize,
    exits: usize,
    pointers: usize,
}

impl LayoutFrame<'_> {
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// A pointer at `point` (logical units) is being released.
    ///
    /// Returns the number of items under it. Ignored, returning `0`, once a
    /// live pointer has been recorded in this frame.
    pub fn record_exit(&mut self, point: Point) -> usize {
        if self.pointers > 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                x = point.x,
                y = point.y,
                pointers = self.pointers,
                "exit recorded after live pointers; ignored"
            );
            return 0;
        }
        let geometry = self.geometry;
        let mut count = 0;
        for item in &mut self.layout.items {
            if item.hit_test(point, &geometry) {
                item.on_pointer_exit();
                count += 1;
            }
        }
        self.exits += count;
        count
    }

    /// A live pointer of unknown id is at `point` (logical units).
    ///
    /// Every item under it is entered, in layout order. Returns the number
    /// of items hit.
    pub fn record_point(&mut self, point: Point) -> usize {
        self.enter(point, None)
    }

    /// Live pointer `id` is at `point` (logical units).
    pub fn record_pointer(&mut self, id: u32, point: Point) -> usize {
        self.enter(point, Some(id))
    }

    fn enter(&mut self, point: Point, id: Option<u32>) -> usize {
        let geometry = self.geometry;
        let landscape = geometry.is_landscape();
        let mut count = 0;
        for item in &mut self.layout.items {
            let bounds = item.bounds(&geometry);
            if bounds.contains(point) {
                let sample = HitSample::new(bounds.normalize(point), landscape);
                item.on_pointer_enter(match id {
                    Some(id) => sample.with_pointer(id),
                    None => sample,
                });
                count += 1;
            }
        }
        self.pointers += 1;
        self.hits += count;
        count
    }

    /// Close the frame: every item commits exactly once.
    pub fn commit(self) -> FrameSummary {
        let mut active = 0;
        for item in &mut self.layout.items {
            item.commit();
            if item.is_active() {
                active += 1;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(hits = self.hits, exits = self.exits, active, "frame committed");
        FrameSummary {
            hits: self.hits,
            exits: self.exits,
            active,
        }
    }
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FrameSummary {
    /// Pointer/item intersections recorded.
    pub hits: usize,
    /// Items under a released pointer.
    pub exits: usize,
    /// Items selected after commit.
    pub active: usize,
}
