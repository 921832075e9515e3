//! `CanvasRenderingContext2d` implementation of the scanner's drawing
//! surface, plus the cached particle sprite.

use crate::constants::{SPRITE_SIZE, SPRITE_STOPS};
use crate::dom;
use hero_core::{Blend, LinearGradient, Rect, Rgba, Surface};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    sprite: web::HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(document: &web::Document, canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = context_2d(canvas)?;
        let sprite = build_sprite(document)?;
        Ok(Self { ctx, sprite })
    }

    fn gradient(&self, g: &LinearGradient) -> web::CanvasGradient {
        let grad = self.ctx.create_linear_gradient(
            g.from.0 as f64,
            g.from.1 as f64,
            g.to.0 as f64,
            g.to.1 as f64,
        );
        for s in &g.stops {
            _ = grad.add_color_stop(s.offset, &s.color.to_css());
        }
        grad
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_blend(&mut self, blend: Blend) {
        _ = self.ctx.set_global_composite_operation(blend.as_css());
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, fill: &LinearGradient) {
        let grad = self.gradient(fill);
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx.begin_path();
        _ = self.ctx.round_rect_with_f64(
            rect.x as f64,
            rect.y as f64,
            rect.w as f64,
            rect.h as f64,
            radius as f64,
        );
        self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, fill: &LinearGradient) {
        let grad = self.gradient(fill);
        self.ctx.set_fill_style_canvas_gradient(&grad);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn draw_sprite(&mut self, rect: Rect) {
        _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &self.sprite,
            rect.x as f64,
            rect.y as f64,
            rect.w as f64,
            rect.h as f64,
        );
    }

    fn fill_solid(&mut self, rect: Rect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

/// Offscreen radial glint drawn once and stamped for every particle.
fn build_sprite(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let sprite: web::HtmlCanvasElement = dom::create(document, "canvas", "")?;
    sprite.set_width(SPRITE_SIZE);
    sprite.set_height(SPRITE_SIZE);
    let ctx = context_2d(&sprite)?;

    let half = SPRITE_SIZE as f64 / 2.0;
    let grad = ctx
        .create_radial_gradient(half, half, 0.0, half, half, half)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    for (offset, color) in SPRITE_STOPS {
        _ = grad.add_color_stop(offset, color);
    }
    ctx.set_fill_style_canvas_gradient(&grad);
    ctx.begin_path();
    ctx.arc(half, half, half, 0.0, std::f64::consts::TAU)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.fill();
    Ok(sprite)
}
