//! Immediate-mode 2D drawing surface
//!
//! The renderer only talks to this trait; the browser canvas and the
//! recording surface used in tests both implement it.

use glam::Vec2;

/// One color stop of a radial gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop<'a> {
    /// Position along the radius, `0.0..=1.0`
    pub offset: f32,
    pub color: &'a str,
}

pub trait Surface {
    /// Apply new pixel dimensions
    fn resize(&mut self, width: u32, height: u32);
    /// Clear the whole surface
    fn clear(&mut self);

    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_line_width(&mut self, width: f32);

    fn line(&mut self, from: Vec2, to: Vec2);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
    fn fill_polygon(&mut self, points: &[Vec2]);

    /// Use a radial gradient as the fill style
    fn set_fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[GradientStop<'_>],
    );
    fn fill_rect(&mut self, origin: Vec2, size: Vec2);
}
