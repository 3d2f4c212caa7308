use std::time::Duration;

use engine::Vec2;

/// Every room transition starts here, not at the player's last position.
pub(crate) const TRANSITION_START: Vec2 = Vec2::new(75.0, 0.0);
pub(crate) const TRANSITION_DURATION: Duration = Duration::from_micros(10);

/// Cubic ease-out move of the player onto a room entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RoomTransition {
    start: Vec2,
    target: Vec2,
    duration_seconds: f32,
    elapsed_seconds: f32,
}

impl RoomTransition {
    pub(crate) fn new(target: Vec2, duration: Duration) -> Self {
        Self {
            start: TRANSITION_START,
            target,
            duration_seconds: duration.as_secs_f32(),
            elapsed_seconds: 0.0,
        }
    }

    pub(crate) fn target(&self) -> Vec2 {
        self.target
    }

    /// Advances by `dt_seconds` and returns the eased position.
    pub(crate) fn step(&mut self, dt_seconds: f32) -> Vec2 {
        self.elapsed_seconds += dt_seconds.max(0.0);
        self.position()
    }

    pub(crate) fn progress(&self) -> f32 {
        if self.duration_seconds <= 0.0 {
            return 1.0;
        }
        (self.elapsed_seconds / self.duration_seconds).min(1.0)
    }

    pub(crate) fn position(&self) -> Vec2 {
        let eased = ease_out_cubic(self.progress());
        Vec2::new(
            self.start.x + (self.target.x - self.start.x) * eased,
            self.start.y + (self.target.y - self.start.y) * eased,
        )
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

pub(crate) fn ease_out_cubic(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}
