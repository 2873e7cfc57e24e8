//! Particle data and lifecycle
//!
//! Particles are spawned by the effect generators, advanced once per tick by
//! [`tick_particles`], and dropped the first tick their life reaches zero.

use glam::Vec2;
use rand::Rng;

use crate::consts::{GRAVITY, TRAIL_POS_JITTER, TRAIL_VEL_JITTER};

/// Render/physics category of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Trail,
    /// Firework burst; the only variant affected by gravity
    Click,
    Sparkle,
    /// Rising translucent bubble (trail physics, own draw strategy)
    Bubble,
    Comet,
    Lightning,
}

impl Variant {
    pub fn has_gravity(&self) -> bool {
        matches!(self, Variant::Click)
    }

    /// Spawn ranges used when no override is given
    fn profile(&self) -> SpawnProfile {
        match self {
            Variant::Trail => SpawnProfile {
                pos_jitter: TRAIL_POS_JITTER,
                vel_x: (-TRAIL_VEL_JITTER, TRAIL_VEL_JITTER),
                vel_y: (-TRAIL_VEL_JITTER, TRAIL_VEL_JITTER),
                size: (2.0, 6.0),
                life: 15,
                color: "#ffffff",
            },
            Variant::Click => SpawnProfile {
                pos_jitter: 0.0,
                vel_x: (0.0, 0.0),
                vel_y: (0.0, 0.0),
                size: (2.0, 5.0),
                life: 60,
                color: "#ffffff",
            },
            Variant::Sparkle => SpawnProfile {
                pos_jitter: 10.0,
                vel_x: (-2.0, 2.0),
                vel_y: (-2.0, 2.0),
                size: (1.0, 4.0),
                life: 30,
                color: crate::settings::SPARKLE_COLOR,
            },
            Variant::Bubble => SpawnProfile {
                pos_jitter: 10.0,
                vel_x: (-0.5, 0.5),
                vel_y: (-3.0, -1.0),
                size: (4.0, 10.0),
                life: 80,
                color: crate::settings::BUBBLE_COLOR,
            },
            Variant::Comet => SpawnProfile {
                pos_jitter: 0.0,
                vel_x: (0.0, 0.0),
                vel_y: (0.0, 0.0),
                size: (1.0, 6.0),
                life: 30,
                color: "#ffffff",
            },
            Variant::Lightning => SpawnProfile {
                pos_jitter: 0.0,
                vel_x: (0.0, 0.0),
                vel_y: (0.0, 0.0),
                size: (1.0, 3.0),
                life: 15,
                color: "#ffffff",
            },
        }
    }
}

struct SpawnProfile {
    /// Max offset from the spawn point on each axis (px)
    pos_jitter: f32,
    vel_x: (f32, f32),
    vel_y: (f32, f32),
    size: (f32, f32),
    life: u32,
    color: &'static str,
}

/// Per-spawn values that replace the variant's random ranges
#[derive(Debug, Clone, Default)]
pub struct ParticleOverrides {
    pub max_life: Option<u32>,
    pub color: Option<String>,
    pub velocity: Option<Vec2>,
    pub size: Option<f32>,
}

/// A single visual particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u64,
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Remaining ticks; dead at 0
    pub life: u32,
    pub max_life: u32,
    pub color: String,
    pub size: f32,
    pub variant: Variant,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Fade ratio in `[0, 1]`
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    /// Advance one tick: integrate, age, apply gravity (click only)
    fn step(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        if self.variant.has_gravity() {
            self.vel.y += GRAVITY;
        }
    }
}

/// Uniform sample in `[lo, hi)`
#[inline]
pub(crate) fn between<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    lo + rng.random::<f32>() * (hi - lo)
}

/// Uniform sample in `[-spread, spread)`
#[inline]
pub(crate) fn jitter<R: Rng>(rng: &mut R, spread: f32) -> f32 {
    between(rng, -spread, spread)
}

/// Random element of a non-empty slice
pub(crate) fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    let idx = (rng.random::<f32>() * items.len() as f32) as usize;
    items[idx.min(items.len().saturating_sub(1))]
}

/// Owns the id counter and random source used to create particles
#[derive(Debug, Clone)]
pub struct Spawner<R> {
    next_id: u64,
    rng: R,
}

impl<R: Rng> Spawner<R> {
    pub fn new(rng: R) -> Self {
        Self { next_id: 1, rng }
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Id the next spawned particle will receive
    pub fn peek_id(&self) -> u64 {
        self.next_id
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create a particle with the variant's jitter applied, then overrides
    pub fn spawn(&mut self, variant: Variant, pos: Vec2, overrides: ParticleOverrides) -> Particle {
        let profile = variant.profile();
        let rng = &mut self.rng;

        let pos = if profile.pos_jitter > 0.0 {
            pos + Vec2::new(jitter(rng, profile.pos_jitter), jitter(rng, profile.pos_jitter))
        } else {
            pos
        };
        let vel = match overrides.velocity {
            Some(vel) => vel,
            None => Vec2::new(
                between(rng, profile.vel_x.0, profile.vel_x.1),
                between(rng, profile.vel_y.0, profile.vel_y.1),
            ),
        };
        let size = match overrides.size {
            Some(size) => size,
            None => between(rng, profile.size.0, profile.size.1),
        };
        // a spawned particle always gets at least one tick
        let max_life = overrides.max_life.unwrap_or(profile.life).max(1);

        Particle {
            id: self.next_id(),
            pos,
            vel,
            life: max_life,
            max_life,
            color: overrides.color.unwrap_or_else(|| profile.color.to_string()),
            size,
            variant,
        }
    }
}

/// Advance all particles one tick and drop the dead ones
pub fn tick_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.step();
    }
    particles.retain(Particle::is_alive);
}
