//! Time-windowed pointer trail
//!
//! Points are stored oldest first. Eviction happens only in [`TrailBuffer::prune`]:
//! first by age, then by the hard point cap.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::{RAINBOW_COLOR_STEP_MS, TRAIL_MAX_POINTS, TRAIL_MIN_OPACITY, TRAIL_TTL_MS};

/// A sampled pointer position
#[derive(Debug, Clone, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Capture time (ms, monotonic)
    pub timestamp: f64,
    pub color: String,
}

impl TrailPoint {
    pub fn age(&self, now_ms: f64) -> f64 {
        now_ms - self.timestamp
    }
}

/// Segment opacity for a point of the given age: linear fade over the TTL,
/// clamped to `[TRAIL_MIN_OPACITY, 1]` (a negative age counts as fresh)
pub fn fade_opacity(age_ms: f64) -> f32 {
    let fade = 1.0 - (age_ms / TRAIL_TTL_MS) as f32;
    fade.clamp(TRAIL_MIN_OPACITY, 1.0)
}

/// Palette color for a trail point captured at `now_ms`
///
/// Each palette entry is held for `RAINBOW_COLOR_STEP_MS`, so consecutive
/// samples cycle through the palette.
pub fn rainbow_color<'a>(palette: &[&'a str], now_ms: f64) -> Option<&'a str> {
    if palette.is_empty() {
        return None;
    }
    let steps = (now_ms / RAINBOW_COLOR_STEP_MS).floor();
    let idx = steps.rem_euclid(palette.len() as f64) as usize;
    palette.get(idx.min(palette.len() - 1)).copied()
}

#[derive(Debug, Clone, Default)]
pub struct TrailBuffer {
    points: VecDeque<TrailPoint>,
}

impl TrailBuffer {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_MAX_POINTS),
        }
    }

    pub fn append(&mut self, point: TrailPoint) {
        self.points.push_back(point);
    }

    /// Drop points older than the TTL, then trim to the cap (oldest first)
    pub fn prune(&mut self, now_ms: f64) {
        while self
            .points
            .front()
            .is_some_and(|p| p.age(now_ms) >= TRAIL_TTL_MS)
        {
            self.points.pop_front();
        }
        while self.points.len() > TRAIL_MAX_POINTS {
            self.points.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }

    /// Consecutive (older, newer) point pairs
    pub fn segments(&self) -> impl Iterator<Item = (&TrailPoint, &TrailPoint)> {
        self.points.iter().zip(self.points.iter().skip(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(timestamp: f64) -> TrailPoint {
        TrailPoint {
            pos: Vec2::new(timestamp as f32, 0.0),
            timestamp,
            color: "#fff".to_string(),
        }
    }

    #[test]
    fn test_ttl_eviction_boundary() {
        let mut trail = TrailBuffer::new();
        trail.append(point(0.0));
        trail.append(point(1.0));
        trail.prune(3000.0);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.iter().next().map(|p| p.timestamp), Some(1.0));
    }

    #[test]
    fn test_cap_keeps_newest() {
        let mut trail = TrailBuffer::new();
        for i in 0..(TRAIL_MAX_POINTS + 20) {
            trail.append(point(i as f64));
        }
        trail.prune(600.0);
        assert_eq!(trail.len(), TRAIL_MAX_POINTS);
        assert_eq!(trail.iter().next().map(|p| p.timestamp), Some(20.0));
    }

    #[test]
    fn test_three_moves_then_expire() {
        let mut trail = TrailBuffer::new();
        for t in [0.0, 10.0, 20.0] {
            trail.append(point(t));
        }
        trail.prune(20.0);
        let stamps: Vec<f64> = trail.iter().map(|p| p.timestamp).collect();
        assert_eq!(stamps, vec![0.0, 10.0, 20.0]);

        trail.prune(20.0 + 3100.0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_segments_pair_neighbours() {
        let mut trail = TrailBuffer::new();
        for t in [0.0, 1.0, 2.0] {
            trail.append(point(t));
        }
        let pairs: Vec<(f64, f64)> = trail.segments().map(|(a, b)| (a.timestamp, b.timestamp)).collect();
        assert_eq!(pairs, vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_rainbow_color_rotation() {
        let palette = ["a", "b", "c"];
        assert_eq!(rainbow_color(&palette, 0.0), Some("a"));
        assert_eq!(rainbow_color(&palette, 49.9), Some("a"));
        assert_eq!(rainbow_color(&palette, 50.0), Some("b"));
        assert_eq!(rainbow_color(&palette, 149.0), Some("c"));
        assert_eq!(rainbow_color(&palette, 150.0), Some("a"));
        assert_eq!(rainbow_color(&[], 10.0), None);
    }

    #[test]
    fn test_fade_floor() {
        assert_eq!(fade_opacity(0.0), 1.0);
        assert!((fade_opacity(1500.0) - 0.5).abs() < 1e-6);
        assert_eq!(fade_opacity(2900.0), TRAIL_MIN_OPACITY);
        assert_eq!(fade_opacity(10_000.0), TRAIL_MIN_OPACITY);
    }

    #[test]
    fn test_fade_ceiling_for_negative_age() {
        assert_eq!(fade_opacity(-5.0), 1.0);
        assert_eq!(fade_opacity(-10_000.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_prune_evicts_and_caps(
            gaps in prop::collection::vec(0.0f64..50.0, 0..800),
            wait in 0.0f64..4000.0,
        ) {
            let mut trail = TrailBuffer::new();
            let mut t = 0.0;
            for gap in gaps {
                t += gap;
                trail.append(point(t));
            }
            let now = t + wait;
            trail.prune(now);

            prop_assert!(trail.len() <= TRAIL_MAX_POINTS);
            prop_assert!(trail.iter().all(|p| now - p.timestamp < TRAIL_TTL_MS));
            let stamps: Vec<f64> = trail.iter().map(|p| p.timestamp).collect();
            prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_prune_idempotent(
            stamps in prop::collection::vec(0.0f64..10_000.0, 0..700),
            now in 0.0f64..12_000.0,
        ) {
            let mut sorted = stamps;
            sorted.sort_by(|a, b| a.total_cmp(b));
            let mut trail = TrailBuffer::new();
            for s in sorted {
                trail.append(point(s));
            }
            trail.prune(now);
            let once: Vec<TrailPoint> = trail.iter().cloned().collect();
            trail.prune(now);
            let twice: Vec<TrailPoint> = trail.iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_fade_decreasing(a in 0.0f64..2700.0, delta in 1.0f64..200.0) {
            let b = a + delta;
            prop_assert!(fade_opacity(b) < fade_opacity(a) || fade_opacity(b) == TRAIL_MIN_OPACITY);
            prop_assert!(fade_opacity(b) <= fade_opacity(a));
        }
    }
}
