//! Simulation state
//!
//! A [`Simulation`] owns every piece of mutable effect state: the particle
//! collection, the trail buffer, the id counter and the random source.
//! Independent instances never share anything.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects;
use super::particle::{Particle, Spawner};
use super::trail::TrailBuffer;
use crate::is_finite_point;
use crate::settings::EffectConfig;

/// Pointer event kinds delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Down,
    Up,
    Click,
}

/// A host pointer event; `position` is `None` when the host could not
/// supply coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Option<Vec2>,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            position: Some(Vec2::new(x, y)),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn click(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Click, x, y)
    }

    /// Usable coordinates, if any
    pub fn point(&self) -> Option<Vec2> {
        self.position.filter(|p| is_finite_point(*p))
    }
}

/// Particle/trail simulation, generic over its random source
#[derive(Debug, Clone)]
pub struct Simulation<R = Pcg32> {
    pub(crate) config: EffectConfig,
    pub(crate) particles: Vec<Particle>,
    pub(crate) trail: TrailBuffer,
    spawner: Spawner<R>,
    /// Last known pointer position (glow center)
    pointer: Option<Vec2>,
    pressed: bool,
    /// Spawns rejected by the particle budget
    dropped: u64,
    /// Ticks advanced so far
    pub(crate) ticks: u64,
}

impl Simulation<Pcg32> {
    /// Create a simulation with a seeded PCG source
    pub fn new(config: EffectConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    pub fn with_rng(config: EffectConfig, rng: R) -> Self {
        Self {
            config,
            particles: Vec::new(),
            trail: TrailBuffer::new(),
            spawner: Spawner::new(rng),
            pointer: None,
            pressed: false,
            dropped: 0,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Replace the configuration; live particles keep their spawn-time values
    pub fn set_config(&mut self, config: EffectConfig) {
        log::info!(
            "Effect config updated: intensity={}, budget={:?}",
            config.intensity.as_str(),
            config.particle_budget
        );
        self.config = config;
    }

    /// Live particles in insertion (draw) order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn dropped_spawns(&self) -> u64 {
        self.dropped
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Feed one pointer event; returns the number of particles added.
    ///
    /// Events without usable coordinates are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent, now_ms: f64) -> usize {
        let Some(pos) = event.point() else {
            log::debug!("Ignoring {:?} event without coordinates", event.kind);
            return 0;
        };
        self.pointer = Some(pos);

        match event.kind {
            PointerKind::Move => {
                let spawn = effects::on_move(&mut self.spawner, pos, now_ms, &self.config);
                if let Some(point) = spawn.trail_point {
                    self.trail.append(point);
                }
                self.admit(spawn.particles)
            }
            PointerKind::Click => {
                let burst = effects::on_click(&mut self.spawner, pos, &self.config);
                self.admit(burst)
            }
            PointerKind::Down => {
                self.pressed = true;
                0
            }
            PointerKind::Up => {
                self.pressed = false;
                0
            }
        }
    }

    /// Append new particles, honoring the optional particle budget
    fn admit(&mut self, mut spawned: Vec<Particle>) -> usize {
        if let Some(budget) = self.config.particle_budget {
            let room = budget.saturating_sub(self.particles.len());
            if spawned.len() > room {
                let rejected = spawned.len() - room;
                self.dropped += rejected as u64;
                log::debug!("Particle budget {} reached, dropping {} spawns", budget, rejected);
                spawned.truncate(room);
            }
        }
        let added = spawned.len();
        self.particles.extend(spawned);
        added
    }
}
