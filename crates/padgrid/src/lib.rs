#![forbid(unsafe_code)]

//! padgrid public facade crate.
//!
//! Re-exports the types most hosts need from the internal crates and
//! offers a prelude for day-to-day use.
//!
//! ```ignore
//! use padgrid::prelude::*;
//!
//! let spec = padgrid::decode(xml)?;
//! let mut session = ControlSession::new(spec, SessionConfig::from_env(), viewport, publisher);
//! session.handle(&event);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use padgrid_core::event::{PointerTracker, TouchEvent, TouchPhase, TouchPoint};
pub use padgrid_core::geometry::{GridGeometry, GridSize, Point, Rect, Viewport};

// --- Layout re-exports -----------------------------------------------------

pub use padgrid_layout::{
    Button, Control, DrawOp, Encoded, ExtraDetail, Item, ItemFlags, ItemKind, Layout,
    LayoutError, Mode, ModeSpec, Orientation, PanelMode, Placement, RecordingSurface,
    RenderStyle, Rgba, Slider, Surface, ToggleButton, TouchPanel,
};

// --- Format re-exports -----------------------------------------------------

#[cfg(feature = "format")]
pub use padgrid_format::{
    CatalogError, Category, DecodeError, LayoutCatalog, decode, decode_file, decode_in_background,
    decode_or_default,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use padgrid_runtime::{
    ControlSession, FrameReport, InteractionDriver, LayoutPublisher, RedrawSink, SessionConfig,
    ViewportProvider,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for padgrid hosts.
#[derive(Debug)]
pub enum Error {
    /// Layout description could not be decoded.
    #[cfg(feature = "format")]
    Decode(DecodeError),
    /// Layout directory could not be read.
    #[cfg(feature = "format")]
    Catalog(CatalogError),
    /// Item placement was rejected.
    Layout(LayoutError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "format")]
            Self::Decode(err) => write!(f, "{err}"),
            #[cfg(feature = "format")]
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(feature = "format")]
impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

#[cfg(feature = "format")]
impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

/// Standard result type for padgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Item, Layout, Mode, ModeSpec, Placement, PointerTracker, RenderStyle, Result,
        TouchEvent, TouchPhase, Viewport,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ControlSession, SessionConfig};

    pub use crate::{core, layout};

    #[cfg(feature = "format")]
    pub use crate::format;

    #[cfg(feature = "runtime")]
    pub use crate::runtime;
}

pub use padgrid_core as core;
#[cfg(feature = "format")]
pub use padgrid_format as format;
pub use padgrid_layout as layout;
#[cfg(feature = "runtime")]
pub use padgrid_runtime as runtime;
