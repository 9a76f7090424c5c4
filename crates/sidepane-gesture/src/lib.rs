//! Pointer sample types and drag recognition for side panels
//!
//! A panel drags along a single axis, so this crate works in one dimension:
//! the host projects its pointer events onto the panel's axis and feeds the
//! resulting [`PointerSample`]s to a [`GestureTracker`], which classifies
//! jitter vs. intent and measures drag distance and release speed.

mod constants;
mod tracker;
mod types;

pub use constants::*;
pub use tracker::GestureTracker;
pub use types::{PointerPhase, PointerSample};
