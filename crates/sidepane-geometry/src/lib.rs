//! Pure math/data for side-panel geometry
//!
//! This crate contains the geometric primitives used by the panel crate.
//! Coordinates are logical pixels, x growing rightwards.

mod geometry;

pub use geometry::*;
