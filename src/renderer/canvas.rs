//! Canvas 2D backend (wasm32 only)

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::surface::{GradientStop, Surface};

/// [`Surface`] over an `HtmlCanvasElement`'s 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by id and acquire its 2D context
    pub fn acquire(document: &Document, canvas_id: &str) -> Option<Self> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)?
            .dyn_into()
            .ok()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Viewport (client) coordinates to canvas pixel coordinates
    pub fn to_local(&self, client_x: i32, client_y: i32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 { self.canvas.width() as f64 / rect.width() } else { 1.0 };
        let scale_y = if rect.height() > 0.0 { self.canvas.height() as f64 / rect.height() } else { 1.0 };
        Vec2::new(
            ((client_x as f64 - rect.left()) * scale_x) as f32,
            ((client_y as f64 - rect.top()) * scale_y) as f32,
        )
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.stroke();
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn set_fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[GradientStop<'_>],
    ) {
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient =
            match self
                .ctx
                .create_radial_gradient(x, y, inner_radius as f64, x, y, outer_radius as f64)
            {
                Ok(gradient) => gradient,
                Err(e) => {
                    log::warn!("Radial gradient failed: {:?}", e);
                    return;
                }
            };
        for stop in stops {
            let _ = gradient.add_color_stop(stop.offset, stop.color);
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }
}
