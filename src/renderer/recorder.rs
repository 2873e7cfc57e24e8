//! Headless surface that records draw calls

use glam::Vec2;

use super::surface::{GradientStop, Surface};

/// A recorded surface operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Resize { width: u32, height: u32 },
    Clear,
    StrokeStyle(String),
    FillStyle(String),
    GlobalAlpha(f32),
    LineWidth(f32),
    Line { from: Vec2, to: Vec2 },
    FillCircle { center: Vec2, radius: f32 },
    StrokeCircle { center: Vec2, radius: f32 },
    FillPolygon(Vec<Vec2>),
    RadialGradient {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<(f32, String)>,
    },
    FillRect { origin: Vec2, size: Vec2 },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub size: (u32, u32),
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            calls: Vec::new(),
            size: (width, height),
        }
    }

    /// Calls recorded since the last `Clear`
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear))
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.last_frame().iter().filter(|&c| pred(c)).count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.calls.push(DrawCall::Resize { width, height });
    }

    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.calls.push(DrawCall::StrokeStyle(color.to_string()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.calls.push(DrawCall::FillStyle(color.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.calls.push(DrawCall::GlobalAlpha(alpha));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn line(&mut self, from: Vec2, to: Vec2) {
        self.calls.push(DrawCall::Line { from, to });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.calls.push(DrawCall::FillCircle { center, radius });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.calls.push(DrawCall::StrokeCircle { center, radius });
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.calls.push(DrawCall::FillPolygon(points.to_vec()));
    }

    fn set_fill_radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[GradientStop<'_>],
    ) {
        self.calls.push(DrawCall::RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: stops.iter().map(|s| (s.offset, s.color.to_string())).collect(),
        });
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.calls.push(DrawCall::FillRect { origin, size });
    }
}
