//! Shared gesture constants for consistent drag recognition.
//!
//! # DPI Considerations
//!
//! These values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's DPI factor before constructing the
//! tracker. The tracker itself is density-agnostic.

/// Smallest drag threshold in logical pixels, reached at sensitivity 1.0.
///
/// Matches common platform touch slop (Android's ViewConfiguration uses
/// ~8dp; 10 leaves a little extra headroom for coarse digitizers).
pub const MIN_SENSITIVITY_PX: f32 = 10.0;

/// Largest drag threshold in logical pixels, reached at sensitivity 0.0.
///
/// At this setting a drag must cover roughly a finger-width's worth of
/// travel before it arms, which effectively reserves the surface for taps.
pub const MAX_SENSITIVITY_PX: f32 = 260.0;

/// Maps a `[0, 1]` sensitivity fraction to an absolute pixel threshold.
///
/// The mapping is inverted: lower sensitivity means a larger threshold and
/// therefore fewer recognized drags.
pub fn threshold_px(sensitivity: f32) -> f32 {
    ((1.0 - sensitivity) * (MAX_SENSITIVITY_PX - MIN_SENSITIVITY_PX) + MIN_SENSITIVITY_PX).round()
}
