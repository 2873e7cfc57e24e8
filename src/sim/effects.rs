//! Effect generators
//!
//! One function per effect. Each turns a pointer position into new particles
//! (or, for `rainbow`, a trail point). Generators never touch existing state;
//! the caller decides whether an effect is enabled.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::particle::{ParticleOverrides, Particle, Spawner, Variant, between, pick};
use super::trail::{TrailPoint, rainbow_color};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::settings::{EffectConfig, EffectKind, LIGHTNING_PALETTE};

/// Roll a probability gate
#[inline]
pub fn random_gate<R: Rng>(rng: &mut R, chance: f32) -> bool {
    rng.random::<f32>() < chance
}

/// Everything a single pointer-move produced
#[derive(Debug, Default)]
pub struct MoveSpawn {
    pub particles: Vec<Particle>,
    pub trail_point: Option<TrailPoint>,
}

/// Run every enabled per-move generator for one pointer-move
pub fn on_move<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2, now_ms: f64, config: &EffectConfig) -> MoveSpawn {
    let mut out = MoveSpawn::default();

    if config.is_enabled(EffectKind::Rainbow) {
        out.trail_point = rainbow(pos, now_ms, config);
    }
    if config.is_enabled(EffectKind::Trail) {
        out.particles.extend(trail(spawner, pos, config));
    }
    if config.is_enabled(EffectKind::Sparkles) {
        out.particles.extend(sparkles(spawner, pos));
    }
    if config.is_enabled(EffectKind::Bubbles) {
        out.particles.extend(bubbles(spawner, pos));
    }
    if config.is_enabled(EffectKind::Comet) {
        out.particles.extend(comet(spawner, pos, config));
    }
    if config.is_enabled(EffectKind::Lightning) {
        out.particles.extend(lightning(spawner, pos));
    }

    out
}

/// Run the click generators (fireworks) for one click
pub fn on_click<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2, config: &EffectConfig) -> Vec<Particle> {
    if config.is_enabled(EffectKind::Fireworks) {
        fireworks(spawner, pos, config)
    } else {
        Vec::new()
    }
}

/// Continuous trail sample, colored by time rotation through the palette
pub fn rainbow(pos: Vec2, now_ms: f64, config: &EffectConfig) -> Option<TrailPoint> {
    let palette = config.combined_palette();
    let color = rainbow_color(&palette, now_ms)?;
    Some(TrailPoint {
        pos,
        timestamp: now_ms,
        color: color.to_string(),
    })
}

pub fn trail<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2, config: &EffectConfig) -> Vec<Particle> {
    let palette = config.combined_palette();
    let tier = config.intensity;

    (0..tier.particle_count())
        .map(|_| {
            let color = pick(spawner.rng(), &palette).to_string();
            spawner.spawn(
                Variant::Trail,
                pos,
                ParticleOverrides {
                    max_life: Some(tier.trail_length()),
                    color: Some(color),
                    ..Default::default()
                },
            )
        })
        .collect()
}

pub fn sparkles<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2) -> Vec<Particle> {
    if !random_gate(spawner.rng(), SPARKLE_CHANCE) {
        return Vec::new();
    }
    (0..SPARKLE_COUNT)
        .map(|_| {
            spawner.spawn(
                Variant::Sparkle,
                pos,
                ParticleOverrides {
                    max_life: Some(SPARKLE_LIFE),
                    ..Default::default()
                },
            )
        })
        .collect()
}

pub fn bubbles<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2) -> Vec<Particle> {
    if !random_gate(spawner.rng(), BUBBLE_CHANCE) {
        return Vec::new();
    }
    (0..BUBBLE_COUNT)
        .map(|_| {
            spawner.spawn(
                Variant::Bubble,
                pos,
                ParticleOverrides {
                    max_life: Some(BUBBLE_LIFE),
                    ..Default::default()
                },
            )
        })
        .collect()
}

/// Fixed tail of shrinking, shorter-lived particles behind the pointer
pub fn comet<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2, config: &EffectConfig) -> Vec<Particle> {
    let palette = config.palette();

    (0..COMET_SEGMENTS)
        .filter_map(|i| {
            let max_life = COMET_LIFE.saturating_sub(i as u32 * 3);
            if max_life == 0 {
                return None;
            }
            let offset = Vec2::new(i as f32 * 3.0, i as f32 * 2.0);
            Some(spawner.spawn(
                Variant::Comet,
                pos - offset,
                ParticleOverrides {
                    max_life: Some(max_life),
                    color: Some(palette[i % palette.len()].to_string()),
                    velocity: Some(Vec2::ZERO),
                    size: Some((6.0 - i as f32).max(1.0)),
                },
            ))
        })
        .collect()
}

/// Scattered ring of short-lived cool-white sparks
pub fn lightning<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2) -> Vec<Particle> {
    if !random_gate(spawner.rng(), LIGHTNING_CHANCE) {
        return Vec::new();
    }
    (0..LIGHTNING_COUNT)
        .map(|_| {
            let rng = spawner.rng();
            let angle = between(rng, 0.0, TAU);
            let dist = between(rng, LIGHTNING_MIN_DIST, LIGHTNING_MAX_DIST);
            let color = pick(rng, &LIGHTNING_PALETTE).to_string();
            spawner.spawn(
                Variant::Lightning,
                pos + polar_to_cartesian(dist, angle),
                ParticleOverrides {
                    max_life: Some(LIGHTNING_LIFE),
                    color: Some(color),
                    velocity: Some(Vec2::ZERO),
                    ..Default::default()
                },
            )
        })
        .collect()
}

/// Evenly spaced radial burst; subject to gravity
pub fn fireworks<R: Rng>(spawner: &mut Spawner<R>, pos: Vec2, config: &EffectConfig) -> Vec<Particle> {
    let palette = config.palette();

    (0..FIREWORK_COUNT)
        .map(|i| {
            let angle = TAU * i as f32 / FIREWORK_COUNT as f32;
            let rng = spawner.rng();
            let speed = between(rng, FIREWORK_MIN_SPEED, FIREWORK_MAX_SPEED);
            let color = pick(rng, &palette).to_string();
            spawner.spawn(
                Variant::Click,
                pos,
                ParticleOverrides {
                    max_life: Some(FIREWORK_LIFE),
                    color: Some(color),
                    velocity: Some(polar_to_cartesian(speed, angle)),
                    ..Default::default()
                },
            )
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::settings::{IntensityTier, SPARKLE_COLOR};
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    /// Rng that always returns the same word: 0 passes every gate, MAX fails every gate
    pub(crate) struct FixedRng(pub u32);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }
        fn next_u64(&mut self) -> u64 {
            ((self.0 as u64) << 32) | self.0 as u64
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for (i, byte) in dst.iter_mut().enumerate() {
                *byte = self.0.to_le_bytes()[i % 4];
            }
        }
    }

    pub(crate) fn always() -> Spawner<FixedRng> {
        Spawner::new(FixedRng(0))
    }

    pub(crate) fn never() -> Spawner<FixedRng> {
        Spawner::new(FixedRng(u32::MAX))
    }

    #[test]
    fn test_gate_extremes() {
        assert!(random_gate(&mut FixedRng(0), 0.1));
        assert!(!random_gate(&mut FixedRng(u32::MAX), 0.3));
    }

    #[test]
    fn test_trail_high_intensity() {
        let config = EffectConfig {
            intensity: IntensityTier::High,
            ..EffectConfig::with_effects([EffectKind::Trail])
        };
        let mut spawner = Spawner::new(Pcg32::seed_from_u64(5));
        let out = on_move(&mut spawner, Vec2::new(100.0, 100.0), 0.0, &config);

        assert!(out.trail_point.is_none());
        assert_eq!(out.particles.len(), 8);
        for p in &out.particles {
            assert_eq!(p.max_life, 25);
            assert_eq!(p.variant, Variant::Trail);
            assert!((95.0..=105.0).contains(&p.pos.x));
            assert!((95.0..=105.0).contains(&p.pos.y));
            assert!(config.combined_palette().contains(&p.color.as_str()));
        }
    }

    #[test]
    fn test_sparkles_gated() {
        let out = sparkles(&mut always(), Vec2::ZERO);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.max_life == 30 && p.color == SPARKLE_COLOR));
        assert!(out.iter().all(|p| (1.0..=4.0).contains(&p.size)));
        assert!(sparkles(&mut never(), Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_bubbles_gated() {
        let out = bubbles(&mut always(), Vec2::ZERO);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.variant == Variant::Bubble && p.max_life == 80));
        assert!(out.iter().all(|p| p.vel.y < 0.0));
        assert!(bubbles(&mut never(), Vec2::ZERO).is_empty());
    }

    #[test]
    fn test_comet_chain() {
        let mut spawner = never();
        let out = comet(&mut spawner, Vec2::new(50.0, 50.0), &EffectConfig::default());
        assert_eq!(out.len(), 5);
        let lives: Vec<u32> = out.iter().map(|p| p.max_life).collect();
        let sizes: Vec<f32> = out.iter().map(|p| p.size).collect();
        assert_eq!(lives, vec![30, 27, 24, 21, 18]);
        assert_eq!(sizes, vec![6.0, 5.0, 4.0, 3.0, 2.0]);
        assert_eq!(out[4].pos, Vec2::new(38.0, 42.0));
    }

    #[test]
    fn test_lightning_ring() {
        let mut spawner = Spawner::new(Pcg32::seed_from_u64(9));
        // Find a roll that passes the 10% gate
        let origin = Vec2::new(200.0, 200.0);
        let out = (0..500)
            .map(|_| lightning(&mut spawner, origin))
            .find(|v| !v.is_empty())
            .unwrap();
        assert_eq!(out.len(), 8);
        for p in &out {
            let dist = p.pos.distance(origin);
            assert!((LIGHTNING_MIN_DIST - 0.01..=LIGHTNING_MAX_DIST + 0.01).contains(&dist));
            assert!(LIGHTNING_PALETTE.contains(&p.color.as_str()));
            assert_eq!(p.max_life, 15);
        }
        assert!(lightning(&mut never(), origin).is_empty());
    }

    #[test]
    fn test_fireworks_burst() {
        let config = EffectConfig::with_effects([EffectKind::Fireworks]);
        let mut spawner = Spawner::new(Pcg32::seed_from_u64(21));
        let out = on_click(&mut spawner, Vec2::new(10.0, 10.0), &config);

        assert_eq!(out.len(), 15);
        for (i, p) in out.iter().enumerate() {
            assert_eq!(p.max_life, 60);
            assert_eq!(p.variant, Variant::Click);
            let expected = TAU * i as f32 / 15.0;
            let angle = p.vel.y.atan2(p.vel.x).rem_euclid(TAU);
            let diff = (angle - expected).abs();
            assert!(diff < 1e-3 || (TAU - diff) < 1e-3, "particle {i}: {angle} vs {expected}");
            let speed = p.vel.length();
            assert!((FIREWORK_MIN_SPEED - 1e-3..=FIREWORK_MAX_SPEED + 1e-3).contains(&speed));
        }
    }

    #[test]
    fn test_disabled_effects_spawn_nothing() {
        let config = EffectConfig::with_effects([EffectKind::Glow]);
        let mut spawner = always();
        let out = on_move(&mut spawner, Vec2::ZERO, 0.0, &config);
        assert!(out.particles.is_empty());
        assert!(out.trail_point.is_none());
        assert!(on_click(&mut spawner, Vec2::ZERO, &config).is_empty());
    }

    #[test]
    fn test_rainbow_cycles_into_extra_palette() {
        let config = EffectConfig {
            palette: vec!["#aa0000".to_string()],
            extra_palette: vec!["#00bb00".to_string()],
            ..EffectConfig::with_effects([EffectKind::Rainbow])
        };
        let mut spawner = never();

        let first = on_move(&mut spawner, Vec2::ZERO, 0.0, &config).trail_point;
        assert_eq!(first.map(|p| p.color), Some("#aa0000".to_string()));
        let second = on_move(&mut spawner, Vec2::ZERO, 50.0, &config).trail_point;
        assert_eq!(second.map(|p| p.color), Some("#00bb00".to_string()));
    }

    #[test]
    fn test_all_effects_fire_together() {
        let config = EffectConfig::default();
        let mut spawner = always();
        let out = on_move(&mut spawner, Vec2::new(10.0, 10.0), 0.0, &config);
        // trail(5) + sparkles(2) + bubbles(2) + comet(5) + lightning(8)
        assert_eq!(out.particles.len(), 22);
        assert!(out.trail_point.is_some());
    }
}
