//! Spawn context for particle initialization.
//!
//! Provides helper methods to reduce boilerplate when spawning particles.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Context handed to spawner functions with helpers for common spawn patterns.
///
/// ```ignore
/// sim.with_spawner(|ctx| Particle {
///     position: ctx.random_on_surface(),
///     home: ctx.random_on_surface(),
///     velocity: ctx.random_drift(0.25),
///     radius: ctx.random_range(1.5, 3.5),
///     glow: ctx.random(),
///     glow_rising: ctx.coin_flip(),
/// })
/// ```
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles being spawned.
    pub count: u32,
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Internal RNG - use the helper methods instead of accessing directly.
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a new spawn context for a particle.
    pub(crate) fn new(index: u32, count: u32, width: f32, height: f32) -> Self {
        // Seed RNG based on index for reproducibility within a run,
        // but different each program execution
        let seed = index as u64
            ^ (std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42));

        Self {
            index,
            count,
            width,
            height,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Fair boolean draw.
    #[inline]
    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }

    /// Uniformly random point on the surface, `[0, width] x [0, height]`.
    pub fn random_on_surface(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.gen_range(0.0..self.width.max(f32::MIN_POSITIVE)),
            self.rng.gen_range(0.0..self.height.max(f32::MIN_POSITIVE)),
        )
    }

    /// Random drift velocity with each component in `[-max_speed, max_speed]`.
    pub fn random_drift(&mut self, max_speed: f32) -> Vec2 {
        Vec2::new(
            (self.rng.gen::<f32>() - 0.5) * 2.0 * max_speed,
            (self.rng.gen::<f32>() - 0.5) * 2.0 * max_speed,
        )
    }

    /// Evenly spaced position along a circle centered on the surface.
    ///
    /// Useful for structured demo layouts.
    pub fn ring_position(&self, radius: f32) -> Vec2 {
        let angle = self.progress() * std::f32::consts::TAU;
        Vec2::new(
            self.width * 0.5 + radius * angle.cos(),
            self.height * 0.5 + radius * angle.sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_normalized() {
        let ctx = SpawnContext::new(25, 50, 800.0, 600.0);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn surface_positions_stay_inside() {
        let mut ctx = SpawnContext::new(0, 1, 800.0, 600.0);
        for _ in 0..200 {
            let p = ctx.random_on_surface();
            assert!(p.x >= 0.0 && p.x <= 800.0);
            assert!(p.y >= 0.0 && p.y <= 600.0);
        }
    }

    #[test]
    fn drift_respects_speed_limit() {
        let mut ctx = SpawnContext::new(0, 1, 800.0, 600.0);
        for _ in 0..200 {
            let v = ctx.random_drift(0.25);
            assert!(v.x.abs() <= 0.25);
            assert!(v.y.abs() <= 0.25);
        }
    }

    #[test]
    fn ring_positions_are_centered() {
        let ctx = SpawnContext::new(0, 4, 200.0, 100.0);
        let p = ctx.ring_position(40.0);
        assert!((p.distance(Vec2::new(100.0, 50.0)) - 40.0).abs() < 0.001);
    }
}
