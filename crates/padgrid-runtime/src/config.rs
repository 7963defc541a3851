#![forbid(unsafe_code)]

//! Session configuration.
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `PADGRID_FLOATING_AXES` | `0`/`false` keeps sliders where they were released |
//! | `PADGRID_DENSITY` | overrides the density reported by the viewport |

use padgrid_core::geometry::Viewport;

/// Environment variable controlling [`SessionConfig::floating_axes`].
pub const ENV_FLOATING_AXES: &str = "PADGRID_FLOATING_AXES";
/// Environment variable controlling [`SessionConfig::density_override`].
pub const ENV_DENSITY: &str = "PADGRID_DENSITY";

/// Settings applied to a [`ControlSession`](crate::ControlSession).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Sliders recentre when released.
    pub floating_axes: bool,
    /// Replaces the viewport density when set.
    pub density_override: Option<f32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            floating_axes: true,
            density_override: None,
        }
    }
}

impl SessionConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or unparseable values keep
    /// their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let floating_axes = lookup(ENV_FLOATING_AXES)
            .and_then(|value| parse_bool(&value))
            .unwrap_or(defaults.floating_axes);
        let density_override = lookup(ENV_DENSITY)
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|density| density.is_finite() && *density > 0.0);
        Self {
            floating_axes,
            density_override,
        }
    }

    #[must_use]
    pub fn with_floating_axes(mut self, floating_axes: bool) -> Self {
        self.floating_axes = floating_axes;
        self
    }

    #[must_use]
    pub fn with_density_override(mut self, density: Option<f32>) -> Self {
        self.density_override = density;
        self
    }

    /// `viewport` with the density override applied.
    pub fn apply(&self, viewport: Viewport) -> Viewport {
        match self.density_override {
            Some(density) => Viewport { density, ..viewport },
            None => viewport,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
    {
        Some(false)
    } else {
        padgrid_core::warn!(value, "unrecognised boolean in configuration");
        None
    }
}
