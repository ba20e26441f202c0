//! # dotfield
//!
//! Pointer-reactive fields of glowing, interconnected particles, for ambient
//! window backgrounds.
//!
//! A field owns a fixed set of drifting dots. Every frame each dot pulses its
//! glow, shies away from the pointer, springs back toward its home anchor,
//! drifts, and reflects off the surface edges; nearby dots are joined by
//! lines whose opacity fades with distance and brightness.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dotfield::Simulation;
//!
//! fn main() -> Result<(), dotfield::RunError> {
//!     Simulation::new()
//!         .with_particle_count(50)
//!         .with_visuals(|v| {
//!             v.background(5, 5, 13);
//!         })
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field
//!
//! [`ParticleField`] is the simulation core: a contiguous array of
//! [`Particle`] records advanced in place by [`ParticleField::step`]. It has
//! no window or GPU dependencies and can be driven tick by tick in tests.
//!
//! ### Simulation
//!
//! [`Simulation`] is the builder-style application shell: it opens a window,
//! creates the field at the surface size, and renders every frame until the
//! window closes. Resizing the surface regenerates the particle set; if no
//! GPU is available the field stays dormant instead of crashing.
//!
//! ### Visuals
//!
//! [`VisualConfig`] holds the palette: per-layer glow gradients, link color
//! and width, the clear color, and the optional spring-damped pointer
//! [`Follower`].
//!
//! ## Scaling
//!
//! The edge pass compares every unordered particle pair, which is fine for
//! the default 50 particles but quadratic in the count; counts in the
//! thousands would need a spatial grid.

mod error;
mod field;
mod follower;
mod gpu;
mod input;
mod particle;
mod simulation;
mod spawn;
mod time;
mod visuals;

pub use error::{GpuError, RunError};
pub use field::{FieldConfig, Link, ParticleField, SpawnFn};
pub use follower::{Follower, SpringParams};
pub use glam::{Vec2, Vec4};
pub use input::PointerTracker;
pub use particle::Particle;
pub use simulation::Simulation;
pub use spawn::SpawnContext;
pub use time::Time;
pub use visuals::{rgba, Rgba, VisualConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use dotfield::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{GpuError, RunError};
    pub use crate::field::{FieldConfig, Link, ParticleField};
    pub use crate::follower::{Follower, SpringParams};
    pub use crate::particle::Particle;
    pub use crate::simulation::Simulation;
    pub use crate::spawn::SpawnContext;
    pub use crate::visuals::{rgba, VisualConfig};
    pub use crate::{Vec2, Vec4};
}
