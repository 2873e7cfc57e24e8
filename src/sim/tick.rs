//! Per-frame simulation step
//!
//! Trail pruning always runs before particle advancement so the renderer sees
//! a consistent snapshot.

use rand::Rng;

use super::particle::tick_particles;
use super::state::Simulation;

/// Advance the simulation by one frame
pub fn tick<R: Rng>(sim: &mut Simulation<R>, now_ms: f64) {
    sim.trail.prune(now_ms);
    tick_particles(&mut sim.particles);
    sim.ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{EffectConfig, EffectKind};
    use crate::sim::state::PointerEvent;

    #[test]
    fn test_rainbow_scenario() {
        let mut sim = Simulation::new(EffectConfig::with_effects([EffectKind::Rainbow]), 1);
        for (i, t) in [1000.0, 1010.0, 1020.0].into_iter().enumerate() {
            assert_eq!(sim.handle_pointer(PointerEvent::moved(i as f32, 0.0), t), 0);
        }
        tick(&mut sim, 1020.0);
        let stamps: Vec<f64> = sim.trail().iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![1000.0, 1010.0, 1020.0]);
        assert!(sim.particles().is_empty());

        tick(&mut sim, 1020.0 + 3100.0);
        assert!(sim.trail().is_empty());
    }

    #[test]
    fn test_fireworks_expire_after_max_life() {
        let mut sim = Simulation::new(EffectConfig::with_effects([EffectKind::Fireworks]), 4);
        sim.handle_pointer(PointerEvent::click(0.0, 0.0), 0.0);
        for frame in 1..60 {
            tick(&mut sim, frame as f64 * 16.0);
            assert_eq!(sim.particles().len(), 15, "frame {frame}");
        }
        tick(&mut sim, 60.0 * 16.0);
        assert!(sim.particles().is_empty());
        assert_eq!(sim.ticks(), 60);
    }

    #[test]
    fn test_fireworks_fall() {
        let mut sim = Simulation::new(EffectConfig::with_effects([EffectKind::Fireworks]), 4);
        sim.handle_pointer(PointerEvent::click(0.0, 0.0), 0.0);
        let before: Vec<f32> = sim.particles().iter().map(|p| p.vel.y).collect();
        tick(&mut sim, 16.0);
        for (p, vy) in sim.particles().iter().zip(before) {
            assert!(p.vel.y > vy);
        }
    }

    #[test]
    fn test_sustained_load_stays_bounded() {
        // Every generator on, every gate passing, one move per frame
        let mut sim = Simulation::with_rng(
            EffectConfig {
                intensity: crate::settings::IntensityTier::High,
                ..EffectConfig::default()
            },
            crate::sim::effects::tests::FixedRng(0),
        );
        let mut peak = 0;
        for frame in 0..600 {
            let now = frame as f64 * 16.0;
            sim.handle_pointer(PointerEvent::moved((frame % 400) as f32, 100.0), now);
            tick(&mut sim, now);
            peak = peak.max(sim.particles().len());
        }
        // Longest life is 80 ticks; spawn per frame is bounded, so is the live set
        let per_move = 8 + 2 + 2 + 5 + 8;
        assert!(peak <= per_move * 80);
        assert!(sim.trail().len() <= crate::consts::TRAIL_MAX_POINTS);
    }
}
