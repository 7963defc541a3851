#![forbid(unsafe_code)]

//! Runtime for padgrid: turns touch events into committed layout state and
//! hands it to the host's collaborators.

pub mod config;
pub mod driver;
pub mod session;
pub mod sink;

pub use config::SessionConfig;
pub use driver::{FrameReport, InteractionDriver};
pub use session::ControlSession;
pub use sink::{LayoutPublisher, RecordingPublisher, RedrawCounter, RedrawSink, ViewportProvider};
