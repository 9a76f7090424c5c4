//! Pure rectangle/opacity/settle math for the panel and its content.
//!
//! Every function here is a pure function of the configuration and the
//! derived metrics; the engine holds no mutable state and can be rebuilt
//! per query. All formulas come in mirror-image Start/End branches: the
//! Start-edge result at position `p` equals the End-edge result at
//! `container_width - p`.

use sidepane_geometry::Rect;

use crate::animation::AnimationRequest;
use crate::config::{ContentReaction, DragRegion, Edge, PanelConfig};
use crate::metrics::PanelMetrics;

pub struct PanelLayoutEngine<'a> {
    config: &'a PanelConfig,
    metrics: &'a PanelMetrics,
}

impl<'a> PanelLayoutEngine<'a> {
    pub fn new(config: &'a PanelConfig, metrics: &'a PanelMetrics) -> Self {
        Self { config, metrics }
    }

    fn width(&self) -> f32 {
        self.metrics.container.width
    }

    fn height(&self) -> f32 {
        self.metrics.container.height
    }

    /// Left edge of the panel's core span at the shown rest position: flush
    /// to its anchor edge.
    pub fn shown_left(&self) -> f32 {
        match self.config.edge() {
            Edge::Start => 0.0,
            Edge::End => self.width() - self.metrics.panel_width_px,
        }
    }

    /// Left edge at the hidden rest position: pushed past the anchor edge
    /// with `offset_px` of panel still exposed.
    pub fn hidden_left(&self) -> f32 {
        match self.config.edge() {
            Edge::Start => self.metrics.offset_px - self.metrics.panel_width_px,
            Edge::End => self.width() - self.metrics.offset_px,
        }
    }

    fn rest_left(&self, shown: bool) -> f32 {
        if shown {
            self.shown_left()
        } else {
            self.hidden_left()
        }
    }

    /// The panel's inner edge, the one facing the content area.
    fn leading_edge(&self, panel_left: f32) -> f32 {
        match self.config.edge() {
            Edge::Start => panel_left + self.metrics.panel_width_px,
            Edge::End => panel_left,
        }
    }

    /// Recovers the core-span left edge from a panel rectangle that may
    /// include the shadow extent.
    pub fn panel_left_of(&self, rect: &Rect) -> f32 {
        match self.config.edge() {
            Edge::Start => rect.x,
            Edge::End => rect.x + self.metrics.shadow_px,
        }
    }

    fn panel_rect_at(&self, left: f32) -> Rect {
        let width = self.metrics.panel_width_px + self.metrics.shadow_px;
        let x = match self.config.edge() {
            // Shadow hangs off the inner edge, over the content.
            Edge::Start => left,
            Edge::End => left - self.metrics.shadow_px,
        };
        Rect::new(x, 0.0, width, self.height())
    }

    /// Panel rectangle at rest. Always `panel_width_px` (+ shadow) wide;
    /// shown and hidden rects differ by exactly `travel_px` on both edges.
    pub fn panel_rect(&self, shown: bool) -> Rect {
        self.panel_rect_at(self.rest_left(shown))
    }

    /// Panel rectangle mid-gesture: the rest position of the state the drag
    /// started from, offset by the tracker's raw distance and clamped to
    /// the travel interval. The clamp bounds flip between the two edges.
    pub fn panel_rect_dragging(&self, raw_offset: f32, shown_at_start: bool) -> Rect {
        let left = self.rest_left(shown_at_start) + raw_offset;
        let clamped = match self.config.edge() {
            Edge::Start => left.clamp(self.hidden_left(), self.shown_left()),
            Edge::End => left.clamp(self.shown_left(), self.hidden_left()),
        };
        self.panel_rect_at(clamped)
    }

    /// Content rectangle derived from the current panel rectangle, so the
    /// Scroll/Resize formulas agree whether driven by a gesture or a rest
    /// query.
    pub fn content_rect_for_panel(&self, panel: &Rect) -> Rect {
        let e = self.leading_edge(self.panel_left_of(panel));
        let w = self.width();
        let offset = self.metrics.offset_px;
        let (left, right) = match self.config.content_reaction() {
            ContentReaction::Scroll => {
                let content_w = self.metrics.content_width_px();
                let ratio = self.config.scroll_ratio();
                match self.config.edge() {
                    Edge::Start => {
                        let x = offset + ratio * (e - offset);
                        (x, x + content_w)
                    }
                    Edge::End => {
                        let x = -ratio * ((w - offset) - e);
                        (x, x + content_w)
                    }
                }
            }
            ContentReaction::Resize => match self.config.edge() {
                // Far edge pinned; near edge rides the panel.
                Edge::Start => (e, w),
                Edge::End => (0.0, e),
            },
        };
        Rect::from_span(left, right, self.height())
    }

    pub fn content_rect(&self, shown: bool) -> Rect {
        self.content_rect_for_panel(&self.panel_rect(shown))
    }

    /// Edge-decoration strip hugging the panel's inner edge, for hosts that
    /// render a grab handle or highlight there.
    pub fn edge_rect(&self, shown: bool) -> Rect {
        let e = self.leading_edge(self.rest_left(shown));
        let d = self.metrics.edge_decor_px;
        match self.config.edge() {
            Edge::Start => Rect::new(e - d, 0.0, d, self.height()),
            Edge::End => Rect::new(e, 0.0, d, self.height()),
        }
    }

    /// Fraction of the shown/hidden travel completed, 0 fully closed,
    /// 1 fully open.
    pub fn openness(&self, panel_left: f32) -> f32 {
        let travel = self.metrics.travel_px();
        if travel <= 0.0 {
            return 0.0;
        }
        let e = self.leading_edge(panel_left);
        let fraction = match self.config.edge() {
            Edge::Start => (e - self.metrics.offset_px) / travel,
            Edge::End => ((self.width() - self.metrics.offset_px) - e) / travel,
        };
        fraction.clamp(0.0, 1.0)
    }

    /// Content-overlay opacity: linear in the travel fraction, exactly 0
    /// when closed and the configured maximum when open.
    pub fn overlay_opacity(&self, panel_left: f32) -> f32 {
        self.openness(panel_left) * self.config.overlay_max_opacity()
    }

    pub fn is_over_panel(&self, pos: f32, shown: bool) -> bool {
        let left = self.rest_left(shown);
        pos >= left && pos <= left + self.metrics.panel_width_px
    }

    /// Content is defined as "not panel".
    pub fn is_over_content(&self, pos: f32, shown: bool) -> bool {
        !self.is_over_panel(pos, shown)
    }

    pub fn is_at_edge(&self, pos: f32, tolerance_px: f32) -> bool {
        match self.config.edge() {
            Edge::Start => pos <= tolerance_px,
            Edge::End => pos >= self.width() - tolerance_px,
        }
    }

    /// Region-policy check for a gesture. Decided once, from the drag-start
    /// position; the answer must not flip mid-gesture.
    pub fn drag_allowed(&self, start_pos: f32, open: bool) -> bool {
        match self.config.drag_region(open) {
            DragRegion::Both => true,
            DragRegion::Disabled => false,
            DragRegion::PanelOnly => self.is_over_panel(start_pos, open),
            DragRegion::ContentOnly => self.is_over_content(start_pos, open),
            DragRegion::Edge => self.is_at_edge(start_pos, self.config.edge_tolerance_px()),
        }
    }

    /// Snap decision on release: the panel commits to the candidate state
    /// (the opposite of the one the gesture started from) only once its
    /// leading edge is within `travel * drag_threshold` of that state's
    /// rest position; otherwise it falls back to where it came from. The
    /// comparison direction flips with the edge.
    pub fn release_target_open(&self, panel_left: f32, was_open: bool) -> bool {
        let band = self.metrics.travel_px() * self.config.drag_threshold();
        match (self.config.edge(), was_open) {
            (Edge::Start, false) => panel_left >= self.shown_left() - band,
            (Edge::Start, true) => panel_left > self.hidden_left() + band,
            (Edge::End, false) => panel_left <= self.shown_left() + band,
            (Edge::End, true) => panel_left < self.hidden_left() - band,
        }
    }

    /// Signed distance from the given panel position to the requested rest
    /// state.
    pub fn animation_distance(&self, panel_left: f32, to_shown: bool) -> f32 {
        self.rest_left(to_shown) - panel_left
    }

    /// The settle request for moving from `panel_left` to the requested
    /// rest state at the given gesture speed (px/ms; `None` falls back to
    /// the default settle speed).
    pub fn settle_request(
        &self,
        panel_left: f32,
        to_shown: bool,
        speed_px_ms: Option<f32>,
    ) -> AnimationRequest {
        AnimationRequest::settle(self.animation_distance(panel_left, to_shown), speed_px_ms)
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
