//! Software raster surface
//!
//! Used by the native build and by tests. There is no image decoder here, so
//! the sprite is painted as a solid tint over its destination rectangle.

use super::{Color, Rect, Surface};

/// Default tint standing in for the ship sprite
pub const SPRITE_TINT: Color = Color::rgb(0xF5, 0xF5, 0xDC);

/// Row-major 0xAARRGGBB pixel buffer
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Reallocate for a new size. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, 0);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Cheap content hash (FNV-1a over the pixels), handy for logging and
    /// comparing two runs.
    pub fn checksum(&self) -> u64 {
        self.pixels.iter().fold(0xcbf29ce484222325u64, |hash, &px| {
            (hash ^ px as u64).wrapping_mul(0x100000001b3)
        })
    }

    /// Pixel span covered by `rect`, clipped to the buffer
    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize)> {
        let x0 = rect.x.round().max(0.0);
        let y0 = rect.y.round().max(0.0);
        let x1 = (rect.x + rect.width).round().min(self.width as f32);
        let y1 = (rect.y + rect.height).round().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

impl Surface for FrameBuffer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let argb = color.to_argb();
        let stride = self.width as usize;
        for row in self.pixels.chunks_exact_mut(stride).take(y1).skip(y0) {
            row[x0..x1].fill(argb);
        }
    }

    fn draw_sprite(&mut self, rect: Rect) {
        self.fill_rect(rect, SPRITE_TINT);
    }
}
