//! # Styled Field Example
//!
//! An ember palette on a warm dark background, with the pointer follower
//! turned off.
//!
//! ## What This Demonstrates
//!
//! - `.with_visuals(|v| ...)` for palette overrides
//! - `rgba()` helper for 8-bit color channels
//! - Wider links with a longer reach
//!
//! ## Try This
//!
//! - Re-enable the follower with `v.follower(true)`
//! - Push `link_width` to 2.0 for a heavier web
//!
//! Run with: `cargo run --example styled`

use dotfield::{rgba, Simulation};

fn main() {
    env_logger::init();

    let result = Simulation::new()
        .with_particle_count(60)
        .with_link_radius(170.0)
        .with_visuals(|v| {
            v.background(18, 8, 4)
                .link_color(255, 179, 107)
                .link_width(1.0)
                .follower(false);
            v.base_glow(rgba(251, 146, 60, 0.8), rgba(220, 38, 38, 0.3));
            v.outer_glow(rgba(253, 186, 116, 0.4), rgba(248, 113, 113, 0.2));
        })
        .with_title("dotfield - embers")
        .run();

    if let Err(err) = result {
        eprintln!("styled: {err}");
        std::process::exit(1);
    }
}
