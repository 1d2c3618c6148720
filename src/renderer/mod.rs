//! Rendering module
//!
//! Drawing goes through the [`Surface`] trait: the browser implements it with the
//! 2D canvas context, native and tests with a software [`FrameBuffer`].

pub mod framebuffer;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

pub use framebuffer::FrameBuffer;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sim::ShipState;

/// RGBA colour, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Packed as 0xAARRGGBB
    #[inline]
    pub fn to_argb(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidColor(s.to_owned());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        let a = if hex.len() == 8 { channel(6)? } else { 0xFF };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for Color {
    /// CSS hex notation, alpha omitted when opaque
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in pixels (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Something a frame can be painted onto
pub trait Surface {
    /// Fill a rectangle with a flat colour
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Paint the ship sprite scaled into `rect`
    fn draw_sprite(&mut self, rect: Rect);
}

/// Paint one frame: flat background over the whole viewport, then the ship.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, state: &ShipState, background: Color) {
    let vp = state.viewport;
    surface.fill_rect(Rect::new(0.0, 0.0, vp.width, vp.height), background);

    let ship = &state.ship;
    surface.draw_sprite(Rect::new(ship.pos.x, ship.pos.y, ship.size.x, ship.size.y));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!("#007BFF".parse::<Color>().unwrap(), Color::rgb(0, 0x7B, 0xFF));
        assert_eq!("#007bff80".parse::<Color>().unwrap(), Color::rgba(0, 0x7B, 0xFF, 0x80));
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        for bad in ["007BFF", "#07F", "#GG0000", "#12345", "", "#ééé"] {
            assert!(bad.parse::<Color>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgb(0, 0x7B, 0xFF).to_string(), "#007BFF");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_to_argb() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_argb(), 0xFF123456);
    }
}
