#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::layout::Layout;

/// How the transport should interpret a layout's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Joystick,
    Mouse,
    MouseAbsolute,
    Slideshow,
}

impl Mode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Joystick => "joystick",
            Self::Mouse => "mouse",
            Self::MouseAbsolute => "mouse_absolute",
            Self::Slideshow => "slideshow",
        }
    }
}

/// A layout bound to the mode it runs in.
///
/// The default is a joystick spec with an empty 4x3 layout, used when a
/// layout cannot be loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModeSpec {
    mode: Mode,
    layout: Layout,
}

impl ModeSpec {
    pub fn new(mode: Mode, layout: Layout) -> Self {
        Self { mode, layout }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn into_parts(self) -> (Mode, Layout) {
        (self.mode, self.layout)
    }
}
