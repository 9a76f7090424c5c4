//! Drag recognition over a stream of 1-D pointer positions.

use crate::constants::threshold_px;

/// Turns raw pointer positions into a classified drag.
///
/// The tracker stays disarmed while movement remains within the sensitivity
/// threshold of the touch-down position. The first update that exceeds the
/// threshold arms it and re-origins distance measurement at that position,
/// so pre-arming jitter never contributes to the reported drag distance or
/// release speed.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    threshold: f32,
    /// `reset()` is lazy: the current gesture's values stay readable until
    /// the next `update` reinitializes the tracker. An eager reset would
    /// race with callers that reset and then immediately query the previous
    /// gesture.
    pending_reset: bool,
    armed: bool,
    start_position: f32,
    origin: f32,
    distance: f32,
    start_time_ms: u64,
}

impl GestureTracker {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            threshold: threshold_px(sensitivity),
            pending_reset: true,
            armed: false,
            start_position: 0.0,
            origin: 0.0,
            distance: 0.0,
            start_time_ms: 0,
        }
    }

    /// Rebinds the sensitivity threshold. Takes effect for arming decisions
    /// from the next update on; an already armed gesture is unaffected.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.threshold = threshold_px(sensitivity);
    }

    /// Marks the tracker for reinitialization on the next [`update`].
    ///
    /// [`update`]: GestureTracker::update
    pub fn reset(&mut self) {
        self.pending_reset = true;
    }

    pub fn update(&mut self, position: f32, now_ms: u64) {
        if self.pending_reset {
            self.pending_reset = false;
            self.armed = false;
            self.start_position = position;
            self.origin = position;
            self.distance = 0.0;
            self.start_time_ms = now_ms;
            return;
        }

        if !self.armed {
            let delta = position - self.origin;
            if delta.abs() >= self.threshold {
                // Velocity is measured from the moment of arming; everything
                // before was jitter and must not count.
                self.armed = true;
                self.origin = position;
                self.start_time_ms = now_ms;
                log::trace!("drag armed at {position} (threshold {})", self.threshold);
            }
        } else {
            self.distance = position - self.origin;
        }
    }

    pub fn has_reached_threshold(&self) -> bool {
        self.armed
    }

    /// Signed pixel offset since arming; 0 before arming.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Pointer position at the start of the current gesture.
    pub fn start_position(&self) -> f32 {
        self.start_position
    }

    /// Gesture speed in px/ms, measured from the arming position and time.
    /// `None` until the gesture arms.
    pub fn speed(&self, now_ms: u64) -> Option<f32> {
        if !self.armed {
            return None;
        }
        let elapsed = now_ms.saturating_sub(self.start_time_ms).max(1);
        Some(self.distance.abs() / elapsed as f32)
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
