#![forbid(unsafe_code)]

//! One activation of a layout.
//!
//! A session owns its [`ModeSpec`] for as long as the controller is on
//! screen. Construction configures the items and publishes the initial
//! state. Each [`handle`](ControlSession::handle) call then runs the
//! interaction driver, publishes the committed layout, settles one-shot
//! state and asks the host to redraw.

use std::rc::{Rc, Weak};

use padgrid_core::event::TouchEvent;
use padgrid_core::geometry::Viewport;
use padgrid_layout::{ItemOptions, Layout, Mode, ModeSpec, RenderStyle, Surface};

use crate::config::SessionConfig;
use crate::driver::{FrameReport, InteractionDriver};
use crate::sink::{LayoutPublisher, RedrawSink, ViewportProvider};

/// Drives a layout from touch events for one activation.
pub struct ControlSession<V, P> {
    spec: ModeSpec,
    config: SessionConfig,
    viewport: V,
    publisher: P,
    redraw: Option<Weak<dyn RedrawSink>>,
    driver: InteractionDriver,
}

impl<V, P> ControlSession<V, P>
where
    V: ViewportProvider,
    P: LayoutPublisher,
{
    /// Take ownership of `spec`, configure its items and publish it once.
    pub fn new(mut spec: ModeSpec, config: SessionConfig, viewport: V, mut publisher: P) -> Self {
        let options = ItemOptions::for_layout(spec.layout().extra_detail(), config.floating_axes);
        spec.layout_mut().configure(&options);
        publisher.publish(spec.mode(), spec.layout());
        padgrid_core::info!(
            title = spec.layout().title(),
            mode = spec.mode().label(),
            items = spec.layout().len(),
            "control session started"
        );
        Self {
            spec,
            config,
            viewport,
            publisher,
            redraw: None,
            driver: InteractionDriver::new(),
        }
    }

    /// Attach the owner of the drawing surface. Only a weak reference is kept.
    #[must_use]
    pub fn with_redraw_sink<S: RedrawSink + 'static>(mut self, sink: &Rc<S>) -> Self {
        self.set_redraw_sink(sink);
        self
    }

    pub fn set_redraw_sink<S: RedrawSink + 'static>(&mut self, sink: &Rc<S>) {
        let weak: Weak<S> = Rc::downgrade(sink);
        self.redraw = Some(weak);
    }

    pub fn mode(&self) -> Mode {
        self.spec.mode()
    }

    pub fn layout(&self) -> &Layout {
        self.spec.layout()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Number of events handled so far.
    pub fn frames(&self) -> u64 {
        self.driver.frames()
    }

    /// Current viewport with configuration applied.
    pub fn viewport(&self) -> Viewport {
        self.config.apply(self.viewport.viewport())
    }

    /// Process one touch event.
    pub fn handle(&mut self, event: &TouchEvent) -> FrameReport {
        let viewport = self.viewport();
        let report = self
            .driver
            .process(self.spec.layout_mut(), &viewport, event);
        self.publisher.publish(self.spec.mode(), self.spec.layout());
        self.spec.layout_mut().settle();
        self.request_redraw();
        report
    }

    /// Render every item at the current viewport.
    pub fn draw(&self, surface: &mut dyn Surface, style: &RenderStyle) {
        let geometry = self.spec.layout().geometry(&self.viewport());
        self.spec.layout().draw(surface, &geometry, style);
    }

    /// End the session and hand back its [`ModeSpec`].
    pub fn finish(self) -> ModeSpec {
        padgrid_core::debug!(frames = self.driver.frames(), "control session finished");
        self.spec
    }

    fn request_redraw(&mut self) {
        let Some(weak) = self.redraw.as_ref() else {
            return;
        };
        match weak.upgrade() {
            Some(sink) => sink.request_redraw(),
            None => {
                padgrid_core::debug!("redraw owner dropped; detaching");
                self.redraw = None;
            }
        }
    }
}

impl<V, P> std::fmt::Debug for ControlSession<V, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlSession")
            .field("mode", &self.spec.mode())
            .field("items", &self.spec.layout().len())
            .field("frames", &self.driver.frames())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
