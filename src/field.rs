//! The particle field: an owned particle set, the per-tick update, and the
//! O(N²) edge pass.
//!
//! [`ParticleField`] is the simulation core and has no window or GPU
//! dependencies; the application shell feeds it pointer positions and resize
//! events and reads back particles and [`Link`]s for rendering.

use glam::Vec2;

use crate::particle::Particle;
use crate::spawn::SpawnContext;

/// Tuning parameters for a [`ParticleField`].
///
/// The defaults reproduce the stock ambient background: 50 drifting dots,
/// a 200 px pointer bubble, and edges fading out at 150 px.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Number of particles in the set.
    pub count: usize,
    /// Minimum visual radius in pixels.
    pub radius_min: f32,
    /// Maximum visual radius in pixels (exclusive).
    pub radius_max: f32,
    /// Maximum ambient drift speed per axis, in pixels per tick.
    pub drift: f32,
    /// Glow change per tick of the pulse.
    pub glow_step: f32,
    /// Lower reversal bound of the glow pulse.
    pub glow_floor: f32,
    /// Radius of pointer influence, in pixels.
    pub pointer_radius: f32,
    /// Repulsion strength at zero pointer distance.
    pub pointer_push: f32,
    /// Glow added per tick spent inside the pointer bubble.
    pub pointer_glow: f32,
    /// Fraction of the remaining distance to home covered per tick.
    pub spring: f32,
    /// Maximum distance at which two particles are linked, in pixels.
    pub link_radius: f32,
    /// Peak opacity of a link between two touching, fully lit particles.
    pub link_opacity: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 50,
            radius_min: 1.5,
            radius_max: 3.5,
            drift: 0.25,
            glow_step: 0.01,
            glow_floor: 0.3,
            pointer_radius: 200.0,
            pointer_push: 0.03,
            pointer_glow: 0.05,
            spring: 0.05,
            link_radius: 150.0,
            link_opacity: 0.3,
        }
    }
}

/// A connective edge between two nearby particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// First endpoint, in pixels.
    pub a: Vec2,
    /// Second endpoint, in pixels.
    pub b: Vec2,
    /// Rendered opacity in `[0, link_opacity]`.
    pub opacity: f32,
}

/// Spawner function invoked once per particle on creation and on resize.
pub type SpawnFn = Box<dyn Fn(&mut SpawnContext) -> Particle + Send + Sync>;

/// A fixed-size set of glowing particles on a sized surface.
///
/// The set is created for an initial surface size and fully regenerated on
/// every [`resize`](Self::resize). One [`step`](Self::step) advances glow,
/// pointer reaction, spring-back, drift, and boundary reflection for every
/// particle.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
    config: FieldConfig,
    spawner: Option<SpawnFn>,
}

impl ParticleField {
    /// Create a field with the default spawner.
    pub fn new(config: FieldConfig, width: f32, height: f32) -> Self {
        Self::build(config, width, height, None)
    }

    /// Create a field with a custom spawner.
    pub fn with_spawner(config: FieldConfig, width: f32, height: f32, spawner: SpawnFn) -> Self {
        Self::build(config, width, height, Some(spawner))
    }

    fn build(config: FieldConfig, width: f32, height: f32, spawner: Option<SpawnFn>) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            width,
            height,
            config,
            spawner,
        };
        field.populate();
        field
    }

    /// Discard every particle and spawn a fresh set for the current size.
    fn populate(&mut self) {
        self.particles.clear();
        self.particles.reserve(self.config.count);
        for index in 0..self.config.count {
            let mut ctx = SpawnContext::new(
                index as u32,
                self.config.count as u32,
                self.width,
                self.height,
            );
            let particle = match &self.spawner {
                Some(spawn) => spawn(&mut ctx),
                None => default_spawn(&mut ctx, &self.config),
            };
            self.particles.push(particle);
        }
    }

    /// Update the surface size and regenerate the particle set.
    ///
    /// Accumulated motion and glow state is discarded; positions are
    /// re-sampled within the new dimensions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.populate();
        log::debug!(
            "field resized to {}x{}, {} particles respawned",
            width,
            height,
            self.particles.len()
        );
    }

    /// Advance every particle by one tick.
    ///
    /// Per particle, in order: glow pulse, pointer repulsion, spring-to-home,
    /// ambient drift, boundary reflection. `pointer` is the last recorded
    /// pointer position in surface-local pixels, if any.
    pub fn step(&mut self, pointer: Option<Vec2>) {
        let (width, height) = (self.width, self.height);
        let c = self.config.clone();

        for particle in &mut self.particles {
            particle.pulse(c.glow_step, c.glow_floor);

            if let Some(pointer) = pointer {
                let delta = pointer - particle.position;
                let distance = delta.length();
                if distance < c.pointer_radius {
                    let force = (c.pointer_radius - distance) / c.pointer_radius;
                    particle.position -= delta * force * c.pointer_push;
                    particle.brighten(c.pointer_glow);
                }
            }

            particle.position += (particle.home - particle.position) * c.spring;
            particle.position += particle.velocity;
            particle.reflect(width, height);
        }
    }

    /// Collect the connective edges for the current particle positions.
    ///
    /// Unordered-pair pass over the whole set: O(N²), which is 1225 distance
    /// checks at the default 50 particles. Counts in the thousands would need
    /// a spatial grid instead.
    pub fn collect_links(&self, out: &mut Vec<Link>) {
        out.clear();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let (p, q) = (&self.particles[i], &self.particles[j]);
                let distance = p.position.distance(q.position);
                if distance < self.config.link_radius {
                    let avg_glow = (p.glow + q.glow) * 0.5;
                    let fade = 1.0 - distance / self.config.link_radius;
                    out.push(Link {
                        a: p.position,
                        b: q.position,
                        opacity: self.config.link_opacity * fade * avg_glow,
                    });
                }
            }
        }
    }

    /// The connective edges as a fresh vector.
    ///
    /// Render loops should prefer [`collect_links`](Self::collect_links) with
    /// a reused buffer.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        self.collect_links(&mut out);
        out
    }

    /// Upper bound on the number of links a single frame can produce.
    pub fn max_links(&self) -> usize {
        let n = self.config.count;
        n.saturating_mul(n.saturating_sub(1)) / 2
    }

    /// The particles, in spawn order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles in the set.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current surface width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Current surface height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// The tuning parameters this field was built with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

/// Stock spawner: uniformly random position (doubling as home), random radius
/// and drift, random initial glow phase.
fn default_spawn(ctx: &mut SpawnContext, config: &FieldConfig) -> Particle {
    let position = ctx.random_on_surface();
    Particle {
        position,
        home: position,
        velocity: ctx.random_drift(config.drift),
        radius: ctx.random_range(config.radius_min, config.radius_max),
        glow: ctx.random(),
        glow_rising: ctx.coin_flip(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 800.0;
    const HEIGHT: f32 = 600.0;

    fn still_particle(x: f32, y: f32, glow: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            home: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 2.0,
            glow,
            glow_rising: false,
        }
    }

    fn field_with(particles: Vec<Particle>) -> ParticleField {
        ParticleField {
            particles,
            width: WIDTH,
            height: HEIGHT,
            config: FieldConfig::default(),
            spawner: None,
        }
    }

    #[test]
    fn spawn_matches_config() {
        let field = ParticleField::new(FieldConfig::default(), WIDTH, HEIGHT);
        assert_eq!(field.len(), 50);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= WIDTH);
            assert!(p.position.y >= 0.0 && p.position.y <= HEIGHT);
            assert_eq!(p.position, p.home);
            assert!(p.radius >= 1.5 && p.radius < 3.5);
            assert!(p.velocity.x.abs() <= 0.25 && p.velocity.y.abs() <= 0.25);
            assert!(p.glow >= 0.0 && p.glow < 1.0);
        }
    }

    #[test]
    fn glow_stays_bounded_without_pointer() {
        let mut field = field_with(vec![
            still_particle(100.0, 100.0, 0.3),
            still_particle(400.0, 300.0, 0.65),
            still_particle(700.0, 500.0, 1.0),
        ]);
        for _ in 0..5_000 {
            field.step(None);
            for p in field.particles() {
                assert!(p.glow >= 0.3 && p.glow <= 1.0, "glow escaped: {}", p.glow);
            }
        }
    }

    #[test]
    fn pointer_proximity_boosts_glow() {
        let mut field = field_with(vec![still_particle(100.0, 100.0, 0.5)]);
        field.particles[0].glow_rising = true;

        // One tick: +0.01 pulse, then +0.05 proximity boost.
        field.step(Some(Vec2::new(150.0, 100.0)));
        let glow = field.particles()[0].glow;
        assert!((glow - 0.56).abs() < 1e-6, "unexpected glow {glow}");
    }

    #[test]
    fn pointer_boost_clamps_at_one() {
        let mut field = field_with(vec![still_particle(100.0, 100.0, 0.98)]);
        field.particles[0].glow_rising = true;
        field.step(Some(Vec2::new(100.0, 100.0)));
        assert_eq!(field.particles()[0].glow, 1.0);
    }

    #[test]
    fn pointer_outside_radius_has_no_effect() {
        let mut field = field_with(vec![still_particle(100.0, 100.0, 0.5)]);
        field.step(Some(Vec2::new(350.0, 100.0)));
        let p = field.particles()[0];
        assert_eq!(p.position, Vec2::new(100.0, 100.0));
        assert!((p.glow - 0.49).abs() < 1e-6);
    }

    #[test]
    fn pointer_pushes_particles_away() {
        let mut field = field_with(vec![still_particle(100.0, 100.0, 0.5)]);
        field.step(Some(Vec2::new(120.0, 100.0)));
        // Displaced away from the pointer along -x.
        assert!(field.particles()[0].position.x < 100.0);
        assert_eq!(field.particles()[0].position.y, 100.0);
    }

    #[test]
    fn spring_returns_displaced_particle_home() {
        let mut field = field_with(vec![still_particle(200.0, 200.0, 0.5)]);
        field.particles[0].position = Vec2::new(260.0, 140.0);
        for _ in 0..200 {
            field.step(None);
        }
        let p = field.particles()[0];
        assert!(p.position.distance(p.home) < 0.01);
    }

    #[test]
    fn drift_moves_particles() {
        let mut field = field_with(vec![still_particle(400.0, 300.0, 0.5)]);
        field.particles[0].velocity = Vec2::new(0.25, -0.25);
        let before = field.particles()[0].position;
        field.step(None);
        let after = field.particles()[0].position;
        assert!(after.x > before.x);
        assert!(after.y < before.y);
    }

    #[test]
    fn boundary_reflection_flips_exactly_once() {
        let mut field = field_with(vec![still_particle(WIDTH - 0.1, 300.0, 0.5)]);
        // Home on the far side of the wall keeps the particle pinned outside
        // for a few ticks.
        field.particles[0].home = Vec2::new(WIDTH + 20.0, 300.0);
        field.particles[0].position = Vec2::new(WIDTH + 10.0, 300.0);
        field.particles[0].velocity = Vec2::new(0.25, 0.0);

        field.step(None);
        assert_eq!(field.particles()[0].velocity.x, -0.25);

        // Still beyond the wall (the spring holds it there), but already
        // drifting inward: the sign must not flip back.
        assert!(field.particles()[0].position.x > WIDTH);
        field.step(None);
        assert_eq!(field.particles()[0].velocity.x, -0.25);
    }

    #[test]
    fn distant_pairs_are_not_linked() {
        let field = field_with(vec![
            still_particle(100.0, 100.0, 1.0),
            still_particle(250.0, 100.0, 1.0), // exactly 150 apart
        ]);
        assert!(field.links().is_empty());
    }

    #[test]
    fn coincident_pair_links_at_peak_opacity() {
        let field = field_with(vec![
            still_particle(100.0, 100.0, 0.8),
            still_particle(100.0, 100.0, 0.4),
        ]);
        let links = field.links();
        assert_eq!(links.len(), 1);
        // Max distance fade, scaled only by the pair's average glow.
        assert!((links[0].opacity - 0.3 * 0.6).abs() < 1e-6);
    }

    #[test]
    fn link_opacity_fades_with_distance() {
        let field = field_with(vec![
            still_particle(100.0, 100.0, 1.0),
            still_particle(175.0, 100.0, 1.0), // half the link radius
        ]);
        let links = field.links();
        assert_eq!(links.len(), 1);
        assert!((links[0].opacity - 0.15).abs() < 1e-6);
    }

    #[test]
    fn resize_respawns_within_new_dimensions() {
        let mut field = ParticleField::new(FieldConfig::default(), WIDTH, HEIGHT);
        let before: Vec<_> = field.particles().to_vec();

        field.resize(200.0, 100.0);
        assert_eq!(field.len(), 50);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 200.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 100.0);
            assert_eq!(p.position, p.home);
        }
        // Fresh draw, not a carry-over of the old set.
        assert_ne!(before, field.particles());
    }

    #[test]
    fn held_pointer_saturates_glow() {
        // Single particle resting at home with the pointer parked on top of
        // it: glow must converge to 1.0 and stay there.
        let mut field = field_with(vec![still_particle(100.0, 100.0, 0.3)]);
        let pointer = Some(Vec2::new(100.0, 100.0));

        for _ in 0..50 {
            field.step(pointer);
        }
        assert_eq!(field.particles()[0].glow, 1.0);
        assert_eq!(field.particles()[0].position, Vec2::new(100.0, 100.0));

        for _ in 0..50 {
            field.step(pointer);
            assert_eq!(field.particles()[0].glow, 1.0);
        }
    }

    #[test]
    fn custom_spawner_survives_resize() {
        let mut field = ParticleField::with_spawner(
            FieldConfig {
                count: 8,
                ..FieldConfig::default()
            },
            WIDTH,
            HEIGHT,
            Box::new(|ctx| {
                let position = ctx.ring_position(50.0);
                Particle {
                    position,
                    home: position,
                    velocity: Vec2::ZERO,
                    radius: 2.0,
                    glow: 0.5,
                    glow_rising: true,
                }
            }),
        );
        field.resize(400.0, 400.0);
        let center = Vec2::new(200.0, 200.0);
        for p in field.particles() {
            assert!((p.position.distance(center) - 50.0).abs() < 0.001);
        }
    }
}
