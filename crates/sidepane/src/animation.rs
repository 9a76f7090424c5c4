//! Settle-animation parameters handed to the external animation driver.
//!
//! The core never plays animations itself; it computes distance, duration
//! and an easing hint, and the host's driver executes them and reports back.

/// Settle speed assumed when no gesture velocity is available (programmatic
/// open/close, dead-stop releases), in px/ms.
pub const DEFAULT_SETTLE_SPEED_PX_MS: f32 = 2.0;

/// Floor for release velocities so a slow release cannot stretch the settle
/// animation indefinitely.
pub const MIN_SETTLE_SPEED_PX_MS: f32 = 0.5;

/// Easing hints for settle animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseOut,
    FastOutSlowIn,
    LinearOutSlowIn,
}

impl Easing {
    /// Apply the easing curve to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Solves the curve's y for a given x fraction by bisection on the
/// parametric t. A settle animation samples a few dozen fractions at most,
/// so the simple solver is plenty.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    fn sample(p1: f32, p2: f32, t: f32) -> f32 {
        // Bernstein form with endpoints fixed at 0 and 1.
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut t = fraction;
    for _ in 0..24 {
        let x = sample(x1, x2, t);
        if (x - fraction).abs() < 1e-5 {
            break;
        }
        if x < fraction {
            lo = t;
        } else {
            hi = t;
        }
        t = 0.5 * (lo + hi);
    }
    sample(y1, y2, t)
}

/// One settle request for the external driver. The driver must invoke the
/// controller's `animation_finished()` exactly once per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    /// Signed distance the panel's edge still has to cover.
    pub distance_px: f32,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl AnimationRequest {
    /// Builds a settle request from a remaining distance and an optional
    /// gesture speed in px/ms.
    pub fn settle(distance_px: f32, speed_px_ms: Option<f32>) -> Self {
        let speed = speed_px_ms
            .filter(|s| *s > 0.0)
            .map(|s| s.max(MIN_SETTLE_SPEED_PX_MS))
            .unwrap_or(DEFAULT_SETTLE_SPEED_PX_MS);
        Self {
            distance_px,
            duration_ms: (distance_px.abs() / speed).round() as u64,
            easing: Easing::FastOutSlowIn,
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
