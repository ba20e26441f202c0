//! Visual configuration for field rendering.
//!
//! Rendering options are separate from the behavioral tuning in
//! [`FieldConfig`](crate::FieldConfig): colors, layer gradients, and the
//! pointer follower live here.
//!
//! # Usage
//!
//! ```ignore
//! Simulation::new()
//!     .with_visuals(|v| {
//!         v.background(0x10, 0x05, 0x12);
//!         v.link_color(0xff, 0xb3, 0x6b);
//!         v.follower(false);
//!     })
//!     .run()
//! ```

use glam::Vec4;

/// An RGB triple with a straight alpha, channels in `[0, 1]`.
pub type Rgba = Vec4;

/// Build an [`Rgba`] from 8-bit channels and a unit alpha.
pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Rgba {
    Vec4::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        alpha,
    )
}

/// How the field is drawn: per-layer gradient colors, link styling, and the
/// optional pointer follower.
///
/// Each particle renders as three concentric radial layers. The `*_inner`
/// color sits at the layer center, fades through the `*_mid` color partway
/// out, and reaches zero alpha at the layer edge; every layer alpha is then
/// scaled by the particle's glow.
#[derive(Debug, Clone)]
pub struct VisualConfig {
    /// Surface clear color.
    pub background: Rgba,
    /// Solid core disc (extent 1x particle radius).
    pub core: Rgba,
    /// Base glow center color (extent 4x particle radius).
    pub base_inner: Rgba,
    /// Base glow midpoint color, at 40% of the layer extent.
    pub base_mid: Rgba,
    /// Outer glow center color (extent 6x particle radius).
    pub outer_inner: Rgba,
    /// Outer glow midpoint color, at 50% of the layer extent.
    pub outer_mid: Rgba,
    /// Link line color (alpha comes from the link itself).
    pub link: Rgba,
    /// Link line width in pixels.
    pub link_width: f32,
    /// Whether to draw the spring-damped pointer follower.
    pub follower_enabled: bool,
    /// Follower disc radius in pixels.
    pub follower_radius: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        // The stock palette: blue cores bleeding into purple halos on a
        // near-black navy surface.
        Self {
            background: rgba(5, 5, 13, 1.0),
            core: rgba(255, 255, 255, 0.8),
            base_inner: rgba(59, 130, 246, 0.8),
            base_mid: rgba(147, 51, 234, 0.3),
            outer_inner: rgba(96, 165, 250, 0.4),
            outer_mid: rgba(167, 139, 250, 0.2),
            link: rgba(147, 197, 253, 1.0),
            link_width: 0.5,
            follower_enabled: true,
            follower_radius: 16.0,
        }
    }
}

impl VisualConfig {
    /// Set the surface clear color.
    pub fn background(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.background = rgba(r, g, b, 1.0);
        self
    }

    /// Set the link line color.
    pub fn link_color(&mut self, r: u8, g: u8, b: u8) -> &mut Self {
        self.link = rgba(r, g, b, 1.0);
        self
    }

    /// Set the link line width in pixels.
    pub fn link_width(&mut self, width: f32) -> &mut Self {
        self.link_width = width.max(0.0);
        self
    }

    /// Set the two gradient colors of the base glow layer.
    pub fn base_glow(&mut self, inner: Rgba, mid: Rgba) -> &mut Self {
        self.base_inner = inner;
        self.base_mid = mid;
        self
    }

    /// Set the two gradient colors of the outer glow layer.
    pub fn outer_glow(&mut self, inner: Rgba, mid: Rgba) -> &mut Self {
        self.outer_inner = inner;
        self.outer_mid = mid;
        self
    }

    /// Enable or disable the pointer follower.
    pub fn follower(&mut self, enabled: bool) -> &mut Self {
        self.follower_enabled = enabled;
        self
    }

    /// Set the follower disc radius in pixels.
    pub fn follower_radius(&mut self, radius: f32) -> &mut Self {
        self.follower_radius = radius.max(0.0);
        self
    }
}
