//! Effect simulation module
//!
//! All particle and trail logic lives here. This module has no rendering or
//! platform dependencies:
//! - Randomness comes from an injected source (seeded PCG by default)
//! - Particle ids come from a per-instance counter
//! - Particles keep insertion order (later spawns draw on top)

pub mod effects;
pub mod particle;
pub mod state;
pub mod tick;
pub mod trail;

pub use effects::{MoveSpawn, on_click, on_move, random_gate};
pub use particle::{Particle, ParticleOverrides, Spawner, Variant, tick_particles};
pub use state::{PointerEvent, PointerKind, Simulation};
pub use tick::tick;
pub use trail::{TrailBuffer, TrailPoint, fade_opacity, rainbow_color};
