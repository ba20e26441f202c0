//! # Swarm Example
//!
//! A denser field spawned on a ring, showing a custom spawner. The spring
//! pulls every dot back to its ring slot, so pointer sweeps deform the ring
//! and it heals afterwards.
//!
//! ## What This Demonstrates
//!
//! - `.with_spawner(...)` with the `SpawnContext` layout helpers
//! - Spawners are re-invoked on resize, keeping the layout centered
//! - Higher counts still animate comfortably (the edge pass is O(N²))
//!
//! Run with: `cargo run --example swarm`

use dotfield::prelude::*;

fn main() {
    env_logger::init();

    let result = Simulation::new()
        .with_particle_count(120)
        .with_link_radius(90.0)
        .with_spawner(|ctx| {
            // Two concentric rings, alternating by index.
            let radius = if ctx.index % 2 == 0 { 180.0 } else { 260.0 };
            let position = ctx.ring_position(radius);
            Particle {
                position,
                home: position,
                velocity: ctx.random_drift(0.15),
                radius: ctx.random_range(1.5, 3.0),
                glow: ctx.random(),
                glow_rising: ctx.coin_flip(),
            }
        })
        .with_title("dotfield - swarm")
        .run();

    if let Err(err) = result {
        eprintln!("swarm: {err}");
        std::process::exit(1);
    }
}
