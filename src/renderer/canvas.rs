//! Canvas2D surface

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::{RectStyle, Rgb, Surface};
use crate::sim::Canvas;

const HUD_FONT: &str = "16px monospace";

/// Draws into a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, canvas: Canvas) {
        self.ctx
            .clear_rect(0.0, 0.0, canvas.width as f64, canvas.height as f64);
    }

    fn fill_rect(&mut self, center: Vec2, size: f32, style: RectStyle) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(&style.fill.css());
        if let Some(glow) = style.glow {
            ctx.set_shadow_color(&glow.color.css());
            ctx.set_shadow_blur(glow.blur as f64);
        }
        let half = size as f64 / 2.0;
        ctx.fill_rect(
            center.x as f64 - half,
            center.y as f64 - half,
            size as f64,
            size as f64,
        );
        ctx.restore();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, color: Rgb) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_font(HUD_FONT);
        ctx.set_fill_style_str(&color.css());
        if ctx.fill_text(text, pos.x as f64, pos.y as f64).is_err() {
            log::warn!("fill_text failed");
        }
        ctx.restore();
    }
}
