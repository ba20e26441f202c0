//! The particle record and its per-tick behaviors.

use glam::Vec2;

/// A single glowing point in the field.
///
/// Particles are plain value records owned by a [`ParticleField`] in one
/// contiguous array; each tick walks the array and updates them in place.
///
/// [`ParticleField`]: crate::ParticleField
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current location on the surface, in pixels.
    pub position: Vec2,
    /// Fixed anchor the particle is pulled back toward every tick.
    pub home: Vec2,
    /// Ambient drift in pixels per tick, sign-flipped on boundary contact.
    pub velocity: Vec2,
    /// Visual radius in pixels, fixed at creation.
    pub radius: f32,
    /// Pulsing brightness in `[0, 1]`.
    pub glow: f32,
    /// Whether the glow is currently brightening.
    pub glow_rising: bool,
}

impl Particle {
    /// Advance the glow pulse by one tick.
    ///
    /// The pulse moves by `step` per tick and reverses direction at 1.0 and
    /// at `floor`; the value itself never leaves `[floor, 1.0]` once inside.
    pub(crate) fn pulse(&mut self, step: f32, floor: f32) {
        if self.glow_rising {
            self.glow = (self.glow + step).min(1.0);
            if self.glow >= 1.0 {
                self.glow_rising = false;
            }
        } else {
            self.glow = (self.glow - step).max(floor);
            if self.glow <= floor {
                self.glow_rising = true;
            }
        }
    }

    /// Raise the glow by `amount`, clamped to 1.0.
    ///
    /// Pointer proximity uses this to override the natural oscillation clamp.
    pub(crate) fn brighten(&mut self, amount: f32) {
        self.glow = (self.glow + amount).min(1.0);
    }

    /// Flip drift components that still point out of `[0, width] x [0, height]`.
    ///
    /// Only outward-pointing components are negated, so a particle held
    /// outside the surface for several ticks reflects exactly once per
    /// boundary contact. The position is not clamped; the next tick's drift
    /// carries the particle back inside.
    pub(crate) fn reflect(&mut self, width: f32, height: f32) {
        if (self.position.x < 0.0 && self.velocity.x < 0.0)
            || (self.position.x > width && self.velocity.x > 0.0)
        {
            self.velocity.x = -self.velocity.x;
        }
        if (self.position.y < 0.0 && self.velocity.y < 0.0)
            || (self.position.y > height && self.velocity.y > 0.0)
        {
            self.velocity.y = -self.velocity.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(glow: f32, rising: bool) -> Particle {
        Particle {
            position: Vec2::new(10.0, 10.0),
            home: Vec2::new(10.0, 10.0),
            velocity: Vec2::ZERO,
            radius: 2.0,
            glow,
            glow_rising: rising,
        }
    }

    #[test]
    fn pulse_reverses_at_ceiling() {
        let mut p = particle(0.995, true);
        p.pulse(0.01, 0.3);
        assert_eq!(p.glow, 1.0);
        assert!(!p.glow_rising);
    }

    #[test]
    fn pulse_reverses_at_floor() {
        let mut p = particle(0.305, false);
        p.pulse(0.01, 0.3);
        assert_eq!(p.glow, 0.3);
        assert!(p.glow_rising);
    }

    #[test]
    fn pulse_stays_bounded_over_many_ticks() {
        let mut p = particle(0.5, true);
        for _ in 0..10_000 {
            p.pulse(0.01, 0.3);
            assert!(p.glow >= 0.3 && p.glow <= 1.0, "glow escaped: {}", p.glow);
        }
    }

    #[test]
    fn brighten_clamps_at_one() {
        let mut p = particle(0.98, true);
        p.brighten(0.05);
        assert_eq!(p.glow, 1.0);
    }

    #[test]
    fn reflect_flips_outward_component_once() {
        let mut p = particle(0.5, true);
        p.position = Vec2::new(105.0, 50.0);
        p.velocity = Vec2::new(0.2, 0.1);

        p.reflect(100.0, 100.0);
        assert_eq!(p.velocity, Vec2::new(-0.2, 0.1));

        // Still out of bounds but now drifting back: no second flip.
        p.reflect(100.0, 100.0);
        assert_eq!(p.velocity, Vec2::new(-0.2, 0.1));
    }

    #[test]
    fn reflect_handles_both_axes() {
        let mut p = particle(0.5, true);
        p.position = Vec2::new(-1.0, -2.0);
        p.velocity = Vec2::new(-0.25, -0.25);
        p.reflect(640.0, 480.0);
        assert_eq!(p.velocity, Vec2::new(0.25, 0.25));
    }
}
