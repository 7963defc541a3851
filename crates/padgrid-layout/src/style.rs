#![forbid(unsafe_code)]

//! Drawing configuration passed explicitly to every draw call.

/// A packed RGBA color.
///
/// Straight alpha, laid out as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

/// Colors and metrics used when drawing a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: Rgba,
    pub outline: Rgba,
    /// Fill for items that are not selected.
    pub fill: Rgba,
    /// Fill for pressed buttons, latched toggles and touched panels.
    pub fill_active: Rgba,
    pub text: Rgba,
    pub track: Rgba,
    pub knob: Rgba,
    pub marker: Rgba,
    /// Outline stroke width in logical units.
    pub outline_width: f32,
    /// Gap between neighbouring items in logical units.
    pub margin: f32,
    /// Slider knob radius as a fraction of the shorter item side.
    pub knob_ratio: f32,
    /// Scale applied to an item's text size.
    pub text_scale: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            outline: Rgba::WHITE,
            fill: Rgba::TRANSPARENT,
            fill_active: Rgba::rgb(0x33, 0x66, 0xcc),
            text: Rgba::WHITE,
            track: Rgba::rgb(0x80, 0x80, 0x80),
            knob: Rgba::rgb(0x99, 0xcc, 0xff),
            marker: Rgba::rgb(0xff, 0xcc, 0x33),
            outline_width: 2.0,
            margin: 4.0,
            knob_ratio: 0.15,
            text_scale: 1.0,
        }
    }
}

impl RenderStyle {
    #[must_use]
    pub fn with_outline(mut self, outline: Rgba, width: f32) -> Self {
        self.outline = outline;
        self.outline_width = width;
        self
    }

    #[must_use]
    pub fn with_fills(mut self, fill: Rgba, fill_active: Rgba) -> Self {
        self.fill = fill;
        self.fill_active = fill_active;
        self
    }

    #[must_use]
    pub fn with_text(mut self, color: Rgba, scale: f32) -> Self {
        self.text = color;
        self.text_scale = scale;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Fill color for an item in the given selection state.
    #[inline]
    pub fn fill_for(&self, active: bool) -> Rgba {
        if active { self.fill_active } else { self.fill }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_channels() {
        let c = Rgba::rgba(1, 2, 3, 4);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (1, 2, 3, 4));
        assert_eq!(Rgba::WHITE.a(), 255);
    }

    #[test]
    fn margin_never_negative() {
        let style = RenderStyle::default().with_margin(-3.0);
        assert_eq!(style.margin, 0.0);
    }

    #[test]
    fn fill_for_selects_by_state() {
        let style = RenderStyle::default().with_fills(Rgba::BLACK, Rgba::WHITE);
        assert_eq!(style.fill_for(false), Rgba::BLACK);
        assert_eq!(style.fill_for(true), Rgba::WHITE);
    }
}
