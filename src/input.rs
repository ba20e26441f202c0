//! Pointer tracking over the window surface.
//!
//! The tracker is written to by the event loop and read once per frame by
//! the simulation; both run on the same thread, so a plain field is enough
//! (see the concurrency notes in the crate docs).

use glam::Vec2;
use winit::event::WindowEvent;

/// The last recorded pointer position in surface-local pixels.
///
/// `None` until the pointer first enters the surface; afterwards the most
/// recent position is retained even while the pointer rests or leaves.
#[derive(Debug, Default)]
pub struct PointerTracker {
    position: Option<Vec2>,
}

impl PointerTracker {
    /// Create a tracker with no pointer recorded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent pointer position, if any.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Record a pointer position directly.
    pub fn record(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    /// Process a winit window event.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.record(Vec2::new(position.x as f32, position.y as f32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        assert_eq!(PointerTracker::new().position(), None);
    }

    #[test]
    fn retains_last_position() {
        let mut tracker = PointerTracker::new();
        tracker.record(Vec2::new(12.0, 34.0));
        tracker.record(Vec2::new(56.0, 78.0));
        assert_eq!(tracker.position(), Some(Vec2::new(56.0, 78.0)));
    }
}
