//! Spring-damped pointer follower.
//!
//! A decorative companion to the particle field: a soft gradient disc that
//! trails the pointer on a mass-spring-damper instead of sticking to it.

use glam::Vec2;

/// Spring constants for a [`Follower`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    /// Inertial mass of the follower.
    pub mass: f32,
    /// Spring stiffness pulling toward the target.
    pub stiffness: f32,
    /// Velocity damping coefficient.
    pub damping: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            mass: 0.2,
            stiffness: 100.0,
            damping: 10.0,
        }
    }
}

/// A point that chases a moving target on a damped spring.
///
/// Integration is semi-implicit Euler, which is stable for the default
/// constants at typical frame deltas.
#[derive(Debug, Clone, Copy)]
pub struct Follower {
    position: Vec2,
    velocity: Vec2,
    params: SpringParams,
}

impl Follower {
    /// Create a follower at rest at `position`.
    pub fn new(position: Vec2, params: SpringParams) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            params,
        }
    }

    /// Teleport to `position`, dropping any momentum.
    pub fn snap_to(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }

    /// Advance the spring by `dt` seconds toward `target`.
    pub fn step(&mut self, target: Vec2, dt: f32) {
        let accel = (self.params.stiffness * (target - self.position)
            - self.params.damping * self.velocity)
            / self.params.mass;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
    }

    /// Current follower position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current follower velocity.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn converges_to_stationary_target() {
        let mut follower = Follower::new(Vec2::ZERO, SpringParams::default());
        let target = Vec2::new(300.0, 200.0);

        for _ in 0..600 {
            follower.step(target, DT);
        }
        assert!(follower.position().distance(target) < 0.5);
        assert!(follower.velocity().length() < 1.0);
    }

    #[test]
    fn never_diverges_with_default_constants() {
        let mut follower = Follower::new(Vec2::ZERO, SpringParams::default());
        let target = Vec2::new(100.0, 0.0);
        let mut worst = 0.0f32;

        for _ in 0..1_000 {
            follower.step(target, DT);
            let distance = follower.position().distance(target);
            assert!(distance.is_finite());
            worst = worst.max(distance);
        }
        // Started 100 px out; the spring may overshoot but must not blow up.
        assert!(worst < 200.0, "follower diverged to {worst}");
    }

    #[test]
    fn snap_drops_momentum() {
        let mut follower = Follower::new(Vec2::ZERO, SpringParams::default());
        follower.step(Vec2::new(50.0, 50.0), DT);
        assert!(follower.velocity().length() > 0.0);

        follower.snap_to(Vec2::new(10.0, 10.0));
        assert_eq!(follower.position(), Vec2::new(10.0, 10.0));
        assert_eq!(follower.velocity(), Vec2::ZERO);
    }
}
