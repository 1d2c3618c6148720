//! Browser surface backed by `CanvasRenderingContext2d`

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Rect, Surface};
use crate::error::{Error, Result};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
}

impl CanvasSurface {
    /// Wrap the canvas' 2d context. `sprite` should already be loaded.
    pub fn new(canvas: &HtmlCanvasElement, sprite: HtmlImageElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(Error::NoContext2d)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::NoContext2d)?;
        Ok(Self { ctx, sprite })
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
    }

    fn draw_sprite(&mut self, rect: Rect) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.sprite,
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        ) {
            log::warn!("Sprite draw failed: {:?}", e);
        }
    }
}
