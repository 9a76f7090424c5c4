//! Geometry and gesture core for an edge-anchored sliding panel.
//!
//! A panel overlaps a primary content area, can rest open or closed, and
//! transitions between the two either programmatically or through a touch
//! drag, with the content scrolling or resizing in sync. This crate is the
//! pure core of that interaction:
//!
//! - [`PanelConfig`] — validated configuration (edge, widths, drag policy).
//! - [`PanelLayoutEngine`] — stateless rectangle/opacity/settle math.
//! - [`PanelController`] — the single-threaded state machine that dispatches
//!   pointer samples, drives two externally-owned extent handles, and hands
//!   settle animations to an external driver.
//!
//! Rendering, animation playback, and view-hierarchy concerns stay outside;
//! the host feeds pointer samples and container sizes in and applies the
//! rectangles this crate computes.

mod animation;
mod config;
mod controller;
mod layout;
mod metrics;
mod persist;

pub use animation::{AnimationRequest, Easing, DEFAULT_SETTLE_SPEED_PX_MS};
pub use config::{ConfigError, ContentReaction, DragRegion, Edge, PanelConfig};
pub use controller::{ExtentHandle, ListenerId, PanelController, PanelError, PanelState};
pub use layout::PanelLayoutEngine;
pub use metrics::PanelMetrics;
pub use persist::{DecodeError, SavedState};

pub use sidepane_geometry::{Point, Rect, Size};
pub use sidepane_gesture::{GestureTracker, PointerPhase, PointerSample};
