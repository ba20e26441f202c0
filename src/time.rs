//! Frame timing for the animation loop.
//!
//! Tracks elapsed time, per-frame delta, frame count, and a periodically
//! refreshed FPS estimate. The simulation itself is tick-based; the delta is
//! only consumed by time-continuous extras such as the pointer follower.

use std::time::{Duration, Instant};

/// Frame clock for the render loop.
#[derive(Debug)]
pub struct Time {
    /// When the clock was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to refresh the FPS estimate.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a clock starting from now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Advance the clock by one frame. Call once per tick.
    ///
    /// Returns the delta since the previous frame, in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Total elapsed time in seconds since creation.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Time since the last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent frames-per-second estimate.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_at_frame_zero() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.delta(), 0.0);
    }

    #[test]
    fn tick_advances_frame_and_delta() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(10));
        let delta = time.tick();

        assert!(delta > 0.0);
        assert_eq!(time.frame(), 1);
        assert!(time.elapsed() >= delta);
    }

    #[test]
    fn fps_updates_after_interval() {
        let mut time = Time::new();
        time.fps_update_interval = Duration::from_millis(10);
        for _ in 0..5 {
            thread::sleep(Duration::from_millis(5));
            time.tick();
        }
        assert!(time.fps() > 0.0);
    }
}
