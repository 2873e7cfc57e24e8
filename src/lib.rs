//! Cursor FX - pointer-driven particle and trail effects for a 2D canvas
//!
//! Core modules:
//! - `sim`: Particle/trail simulation (spawning, physics, pruning)
//! - `engine`: Frame clock driving tick + draw (Running/Stopped)
//! - `renderer`: Draw strategies over an abstract 2D surface
//! - `settings`: Effect configuration (intensity, palettes, enabled effects)
//! - `platform`: Browser host wiring (canvas, listeners, animation frames)

pub mod engine;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{Engine, EngineState, FrameHandle, FrameScheduler, ManualScheduler};
pub use settings::{EffectConfig, EffectKind, EnabledEffects, IntensityTier};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Trail points older than this (ms) are evicted
    pub const TRAIL_TTL_MS: f64 = 3000.0;
    /// Hard cap on stored trail points, independent of TTL
    pub const TRAIL_MAX_POINTS: usize = 500;
    /// Each rainbow palette index is held for this long (ms)
    pub const RAINBOW_COLOR_STEP_MS: f64 = 50.0;
    /// Trail segments never fade below this opacity
    pub const TRAIL_MIN_OPACITY: f32 = 0.1;
    /// Stroke width of rainbow trail segments
    pub const TRAIL_LINE_WIDTH: f32 = 3.0;

    /// Vertical acceleration applied to firework particles (px/tick²)
    pub const GRAVITY: f32 = 0.1;

    /// Trail particle jitter
    pub const TRAIL_POS_JITTER: f32 = 5.0;
    pub const TRAIL_VEL_JITTER: f32 = 1.0;

    /// Sparkles
    pub const SPARKLE_CHANCE: f32 = 0.3;
    pub const SPARKLE_COUNT: usize = 2;
    pub const SPARKLE_LIFE: u32 = 30;

    /// Bubbles
    pub const BUBBLE_CHANCE: f32 = 0.2;
    pub const BUBBLE_COUNT: usize = 2;
    pub const BUBBLE_LIFE: u32 = 80;

    /// Comet tail
    pub const COMET_SEGMENTS: usize = 5;
    pub const COMET_LIFE: u32 = 30;

    /// Lightning
    pub const LIGHTNING_CHANCE: f32 = 0.1;
    pub const LIGHTNING_COUNT: usize = 8;
    pub const LIGHTNING_LIFE: u32 = 15;
    pub const LIGHTNING_MIN_DIST: f32 = 20.0;
    pub const LIGHTNING_MAX_DIST: f32 = 70.0;

    /// Fireworks burst
    pub const FIREWORK_COUNT: usize = 15;
    pub const FIREWORK_LIFE: u32 = 60;
    pub const FIREWORK_MIN_SPEED: f32 = 3.0;
    pub const FIREWORK_MAX_SPEED: f32 = 8.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// True when both coordinates are usable canvas positions
#[inline]
pub fn is_finite_point(pos: Vec2) -> bool {
    pos.x.is_finite() && pos.y.is_finite()
}
