// Drawing surface the field paints onto each frame. The canvas
// implementation wraps a CanvasRenderingContext2d; anything else (tests,
// offscreen targets) only has to provide these three primitives.

use crate::color::Color;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);

    fn draw_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64);

    // `glow` is a shadow blur radius in the circle's own color, 0 for none
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64, glow: f64);
}

pub struct CanvasSurface {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Grabs the 2d context of a canvas already created on the DOM
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(CanvasSurface { canvas, context })
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    #[allow(deprecated)]
    fn draw_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64, width: f64) {
        let ctx = &self.context;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_stroke_style(&JsValue::from_str(&color.to_css()));
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(from[0], from[1]);
        ctx.line_to(to[0], to[1]);
        ctx.stroke();
        ctx.restore();
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64, glow: f64) {
        let ctx = &self.context;
        let css = color.to_css();
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style(&JsValue::from_str(&css));
        if glow > 0.0 {
            ctx.set_shadow_blur(glow);
            ctx.set_shadow_color(&css);
        }
        ctx.begin_path();
        // arc only fails on a negative radius, which particles never have
        if let Err(e) = ctx.arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0) {
            console::debug_1(&e);
        }
        ctx.fill();
        ctx.restore();
    }
}
