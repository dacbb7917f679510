// src/config.rs

use crate::error::DomainError;

pub const DEFAULT_COUNT: usize = 3;
pub const DEFAULT_PADDING: f64 = 0.2;
pub const DEFAULT_GUTTER: f64 = 0.2;

/// Straight (non-premultiplied) RGBA, each channel in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Opaque color from a `0xRRGGBB` literal, as written in CSS.
    pub fn from_hex(rgb: u32) -> Self {
        Self::from_rgb8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub intersection: Color,
    /// Fill behind the square pattern area.
    pub backdrop: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0xFFCC00),
            foreground: Color::from_hex(0xCCFF00),
            intersection: Color::from_hex(0x00CCFF),
            backdrop: Color::WHITE,
        }
    }
}

/// Startup constants for the pattern. Not changed while the app runs.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternConfig {
    /// Triangles per grid row and column.
    pub count: usize,
    /// Gap between neighbours as a fraction of the triangle side.
    pub padding: f64,
    /// Margin on each side of the unit square.
    pub gutter: f64,
    pub palette: Palette,
    /// When false the surface keeps its current size on viewport resize.
    pub resize_to_viewport: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            padding: DEFAULT_PADDING,
            gutter: DEFAULT_GUTTER,
            palette: Palette::default(),
            resize_to_viewport: true,
        }
    }
}

impl PatternConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_layout(self.padding, self.gutter)
    }
}

pub(crate) fn validate_layout(padding: f64, gutter: f64) -> Result<(), DomainError> {
    if !padding.is_finite() {
        return Err(DomainError::NonFinite { name: "padding", value: padding });
    }
    if !gutter.is_finite() {
        return Err(DomainError::NonFinite { name: "gutter", value: gutter });
    }
    if !(0.0..0.5).contains(&gutter) {
        return Err(DomainError::InvalidGutter(gutter));
    }
    if padding < 0.0 {
        return Err(DomainError::InvalidPadding(padding));
    }
    Ok(())
}
