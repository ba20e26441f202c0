//! # Basic Field Example
//!
//! The stock ambient background: 50 glowing dots, pointer repulsion, and
//! connective edges, all at their default tuning.
//!
//! ## What This Demonstrates
//!
//! - `Simulation::new()` with no configuration
//! - Moving the pointer pushes nearby dots away and brightens them
//! - Resizing the window regenerates the particle set
//!
//! Run with: `cargo run --example basic`

use dotfield::Simulation;

fn main() {
    env_logger::init();

    if let Err(err) = Simulation::new().with_title("dotfield - basic").run() {
        eprintln!("basic: {err}");
        std::process::exit(1);
    }
}
