//! Frame pacing for the render loop.

use web_time::{Duration, Instant};

/// Frame pacing with FPS calculation and optional frame limiting
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    ///
    /// The first frame is due immediately.
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(target_fps))
        } else {
            Duration::ZERO
        };
        let now = Instant::now();

        Self {
            target_fps,
            min_frame_duration,
            last_frame: now.checked_sub(min_frame_duration).unwrap_or(now),
            smoothed_fps: if target_fps > 0 {
                target_fps as f32
            } else {
                60.0
            },
            smoothing: 0.05,
        }
    }

    /// Whether enough time has passed since the last frame to render.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// When the next frame is due, for `ControlFlow::WaitUntil`.
    pub fn next_frame_at(&self) -> Instant {
        self.last_frame + self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_fps_frame_budget() {
        let timing = FrameTiming::new(60);
        let budget = timing.min_frame_duration.as_secs_f64();
        assert!((budget - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(timing.target_fps, 60);
    }

    #[test]
    fn first_frame_is_due_immediately() {
        let timing = FrameTiming::new(60);
        assert!(timing.should_render());
        assert!(timing.next_frame_at() <= Instant::now());
    }

    #[test]
    fn frame_is_not_due_right_after_rendering() {
        let mut timing = FrameTiming::new(1);
        timing.end_frame();
        assert!(!timing.should_render());
        assert!(timing.next_frame_at() > Instant::now());
    }

    #[test]
    fn unlimited_always_renders() {
        let mut timing = FrameTiming::new(0);
        timing.end_frame();
        assert!(timing.should_render());
        assert_eq!(timing.min_frame_duration, Duration::ZERO);
    }

    #[test]
    fn fps_stays_positive_after_frames() {
        let mut timing = FrameTiming::new(60);
        for _ in 0..3 {
            timing.end_frame();
        }
        assert!(timing.fps() > 0.0);
    }
}
