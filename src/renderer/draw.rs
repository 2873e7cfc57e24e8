//! Frame drawing
//!
//! Draw order: clear, rainbow trail, glow, then particles in insertion order.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use super::surface::{GradientStop, Surface};
use crate::consts::TRAIL_LINE_WIDTH;
use crate::settings::{EffectConfig, EffectKind};
use crate::sim::{Particle, Simulation, TrailBuffer, Variant, fade_opacity};

/// How a particle is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStrategy {
    /// Filled disc of `size` radius
    Disc,
    /// Five-pointed star
    Star,
    /// Outlined circle with a highlight dot
    Bubble,
}

/// Bubbles at or below this size are too small for the outline and highlight
pub const BUBBLE_MIN_OUTLINE_SIZE: f32 = 5.0;

/// Variant -> draw strategy table
pub fn strategy_for(variant: Variant, size: f32) -> DrawStrategy {
    match variant {
        Variant::Sparkle => DrawStrategy::Star,
        Variant::Bubble if size > BUBBLE_MIN_OUTLINE_SIZE => DrawStrategy::Bubble,
        Variant::Bubble | Variant::Trail | Variant::Click | Variant::Comet | Variant::Lightning => {
            DrawStrategy::Disc
        }
    }
}

const GLOW_STOPS: [GradientStop<'static>; 3] = [
    GradientStop {
        offset: 0.0,
        color: "rgba(255, 255, 255, 0.3)",
    },
    GradientStop {
        offset: 0.5,
        color: "rgba(255, 255, 255, 0.1)",
    },
    GradientStop {
        offset: 1.0,
        color: "rgba(255, 255, 255, 0)",
    },
];

const BUBBLE_HIGHLIGHT: &str = "rgba(255, 255, 255, 0.8)";

/// Draw one full frame
pub fn draw(
    surface: &mut dyn Surface,
    particles: &[Particle],
    trail: &TrailBuffer,
    pointer: Option<Vec2>,
    config: &EffectConfig,
    now_ms: f64,
) {
    surface.clear();

    if config.is_enabled(EffectKind::Rainbow) && trail.len() >= 2 {
        draw_trail(surface, trail, now_ms);
    }

    if config.is_enabled(EffectKind::Glow) {
        if let Some(center) = pointer {
            draw_glow(surface, center, config.intensity.glow_radius());
        }
    }

    for particle in particles {
        surface.set_global_alpha(particle.opacity());
        match strategy_for(particle.variant, particle.size) {
            DrawStrategy::Disc => {
                surface.set_fill_style(&particle.color);
                surface.fill_circle(particle.pos, particle.size);
            }
            DrawStrategy::Star => {
                surface.set_fill_style(&particle.color);
                surface.fill_polygon(&star_points(particle.pos, particle.size * 2.0, particle.size));
            }
            DrawStrategy::Bubble => draw_bubble(surface, particle),
        }
    }
    surface.set_global_alpha(1.0);
}

/// Draw a simulation's current state
pub fn draw_simulation<R>(surface: &mut dyn Surface, sim: &Simulation<R>, now_ms: f64)
where
    R: rand::Rng,
{
    draw(surface, sim.particles(), sim.trail(), sim.pointer(), sim.config(), now_ms);
}

/// Stroke each consecutive pair; the newer endpoint's age sets the opacity
fn draw_trail(surface: &mut dyn Surface, trail: &TrailBuffer, now_ms: f64) {
    surface.set_line_width(TRAIL_LINE_WIDTH);
    for (older, newer) in trail.segments() {
        surface.set_global_alpha(fade_opacity(newer.age(now_ms)));
        surface.set_stroke_style(&newer.color);
        surface.line(older.pos, newer.pos);
    }
    surface.set_global_alpha(1.0);
}

fn draw_glow(surface: &mut dyn Surface, center: Vec2, radius: f32) {
    surface.set_fill_radial_gradient(center, 0.0, radius, &GLOW_STOPS);
    surface.fill_rect(center - Vec2::splat(radius), Vec2::splat(radius * 2.0));
}

fn draw_bubble(surface: &mut dyn Surface, particle: &Particle) {
    let size = particle.size;
    surface.set_stroke_style(&particle.color);
    surface.set_line_width(1.0);
    surface.stroke_circle(particle.pos, size);

    surface.set_fill_style(BUBBLE_HIGHLIGHT);
    surface.fill_circle(particle.pos - Vec2::splat(size / 3.0), size / 4.0);
}

/// Vertices of a five-pointed star, first point straight up
pub fn star_points(center: Vec2, outer: f32, inner: f32) -> [Vec2; 10] {
    let mut points = [Vec2::ZERO; 10];
    for (i, point) in points.iter_mut().enumerate() {
        let angle = -FRAC_PI_2 + i as f32 * PI / 5.0;
        let r = if i % 2 == 0 { outer } else { inner };
        *point = center + Vec2::new(angle.cos(), angle.sin()) * r;
    }
    points
}
