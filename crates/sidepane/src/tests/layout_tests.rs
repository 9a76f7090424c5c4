use super::*;
use crate::config::{ContentReaction, DragRegion, Edge, PanelConfig};
use crate::metrics::PanelMetrics;
use sidepane_geometry::Size;

const W: f32 = 1000.0;
const H: f32 = 600.0;

fn config(edge: Edge, reaction: ContentReaction) -> PanelConfig {
    let mut config = PanelConfig::new();
    config.set_edge(edge);
    config.set_panel_fraction(0.75).unwrap();
    config.set_offset_fraction(0.125).unwrap();
    config.set_content_reaction(reaction);
    config.set_scroll_ratio(0.5).unwrap();
    config.set_drag_threshold(0.25).unwrap();
    config
}

fn metrics(config: &PanelConfig) -> PanelMetrics {
    PanelMetrics::derive(config, Size::new(W, H), 0.0, 0.0)
}

#[test]
fn derived_pixel_values() {
    let config = config(Edge::End, ContentReaction::Scroll);
    let m = metrics(&config);
    assert_eq!(m.panel_width_px, 750.0);
    assert_eq!(m.offset_px, 125.0);
    assert_eq!(m.travel_px(), 625.0);
    assert_eq!(m.content_width_px(), 875.0);
}

#[test]
fn caps_bound_the_derived_widths() {
    let mut config = config(Edge::Start, ContentReaction::Scroll);
    config.set_max_panel_width(Some(400.0)).unwrap();
    config.set_max_offset(Some(50.0)).unwrap();
    let m = metrics(&config);
    assert_eq!(m.panel_width_px, 400.0);
    assert_eq!(m.offset_px, 50.0);
}

#[test]
fn start_edge_rest_rects() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let open = engine.panel_rect(true);
    let closed = engine.panel_rect(false);
    assert_eq!((open.left(), open.right()), (0.0, 750.0));
    assert_eq!((closed.left(), closed.right()), (-625.0, 125.0));
}

#[test]
fn end_edge_rest_rects() {
    let config = config(Edge::End, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let open = engine.panel_rect(true);
    let closed = engine.panel_rect(false);
    assert_eq!((open.left(), open.right()), (250.0, 1000.0));
    assert_eq!((closed.left(), closed.right()), (875.0, 1625.0));
}

#[test]
fn rest_rects_differ_by_exactly_the_travel() {
    for edge in [Edge::Start, Edge::End] {
        let config = config(edge, ContentReaction::Scroll);
        let m = metrics(&config);
        let engine = PanelLayoutEngine::new(&config, &m);
        let open = engine.panel_rect(true);
        let closed = engine.panel_rect(false);
        assert_eq!((open.left() - closed.left()).abs(), m.travel_px());
        assert_eq!((open.right() - closed.right()).abs(), m.travel_px());
        assert_eq!(open.width, closed.width);
    }
}

#[test]
fn start_and_end_formulas_mirror_each_other() {
    for reaction in [ContentReaction::Scroll, ContentReaction::Resize] {
        let start_cfg = config(Edge::Start, reaction);
        let end_cfg = config(Edge::End, reaction);
        let sm = metrics(&start_cfg);
        let em = metrics(&end_cfg);
        let start = PanelLayoutEngine::new(&start_cfg, &sm);
        let end = PanelLayoutEngine::new(&end_cfg, &em);

        for shown in [false, true] {
            let sp = start.panel_rect(shown);
            let ep = end.panel_rect(shown);
            assert_eq!(sp.left(), W - ep.right(), "panel, shown={shown}");
            assert_eq!(sp.right(), W - ep.left(), "panel, shown={shown}");

            let sc = start.content_rect(shown);
            let ec = end.content_rect(shown);
            assert_eq!(sc.left(), W - ec.right(), "content, shown={shown}");
            assert_eq!(sc.right(), W - ec.left(), "content, shown={shown}");
        }

        // Dragging variants mirror too: the same travel in opposite
        // directions.
        for raw in [-400.0, -50.0, 0.0, 50.0, 400.0] {
            let sp = start.panel_rect_dragging(raw, false);
            let ep = end.panel_rect_dragging(-raw, false);
            assert_eq!(sp.left(), W - ep.right(), "dragging raw={raw}");
            assert_eq!(sp.right(), W - ep.left(), "dragging raw={raw}");
        }
    }
}

#[test]
fn dragging_clamps_to_travel_interval_start_edge() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    // Opening from closed, overshooting far past the open position.
    let rect = engine.panel_rect_dragging(10_000.0, false);
    assert_eq!(rect.left(), 0.0);
    // Pulling further closed than closed.
    let rect = engine.panel_rect_dragging(-50.0, false);
    assert_eq!(rect.left(), -625.0);
    // Mid-travel passes through unclamped.
    let rect = engine.panel_rect_dragging(300.0, false);
    assert_eq!(rect.left(), -325.0);
}

#[test]
fn dragging_clamps_to_travel_interval_end_edge() {
    let config = config(Edge::End, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    // The clamp bounds swap places on this edge; overshoot toward open is
    // negative here.
    let rect = engine.panel_rect_dragging(-10_000.0, false);
    assert_eq!(rect.left(), 250.0);
    let rect = engine.panel_rect_dragging(50.0, false);
    assert_eq!(rect.left(), 875.0);
    let rect = engine.panel_rect_dragging(-300.0, false);
    assert_eq!(rect.left(), 575.0);
}

#[test]
fn scroll_mode_content_translates_by_ratio() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let closed = engine.content_rect(false);
    assert_eq!((closed.left(), closed.right()), (125.0, 1000.0));
    let open = engine.content_rect(true);
    // Panel travelled 625, ratio 0.5: content moved 312.5, width kept.
    assert_eq!((open.left(), open.right()), (437.5, 1312.5));
    assert_eq!(open.width, closed.width);
}

#[test]
fn resize_mode_pins_far_edge_and_shrinks() {
    let config = config(Edge::Start, ContentReaction::Resize);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let closed = engine.content_rect(false);
    assert_eq!((closed.left(), closed.right()), (125.0, 1000.0));
    let open = engine.content_rect(true);
    assert_eq!((open.left(), open.right()), (750.0, 1000.0));
    assert_eq!(closed.width - open.width, m.travel_px());
}

#[test]
fn content_tracks_the_dragged_panel() {
    let config = config(Edge::Start, ContentReaction::Resize);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let panel = engine.panel_rect_dragging(300.0, false);
    let content = engine.content_rect_for_panel(&panel);
    // Near edge rides the panel's leading edge exactly.
    assert_eq!(content.left(), panel.right());
    assert_eq!(content.right(), W);
}

#[test]
fn shadow_extent_is_additive_and_recoverable() {
    let config = config(Edge::End, ContentReaction::Scroll);
    let m = PanelMetrics::derive(&config, Size::new(W, H), 12.0, 0.0);
    let engine = PanelLayoutEngine::new(&config, &m);

    let open = engine.panel_rect(true);
    // Shadow hangs over the content side, widening the rect only there.
    assert_eq!((open.left(), open.right()), (238.0, 1000.0));
    assert_eq!(engine.panel_left_of(&open), 250.0);
    // Content geometry is unaffected by the shadow.
    let content = engine.content_rect_for_panel(&open);
    assert_eq!(content.right(), 875.0 - 312.5);
}

#[test]
fn edge_decor_strip_hugs_the_leading_edge() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = PanelMetrics::derive(&config, Size::new(W, H), 0.0, 6.0);
    let engine = PanelLayoutEngine::new(&config, &m);

    let closed = engine.edge_rect(false);
    assert_eq!((closed.left(), closed.right()), (119.0, 125.0));
    let open = engine.edge_rect(true);
    assert_eq!((open.left(), open.right()), (744.0, 750.0));
}

#[test]
fn overlay_opacity_is_monotonic_with_exact_endpoints() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let closed_left = engine.hidden_left();
    let open_left = engine.shown_left();
    assert_eq!(engine.overlay_opacity(closed_left), 0.0);
    assert_eq!(
        engine.overlay_opacity(open_left),
        config.overlay_max_opacity()
    );

    let mut last = -1.0;
    for step in 0..=20 {
        let left = closed_left + (open_left - closed_left) * (step as f32 / 20.0);
        let opacity = engine.overlay_opacity(left);
        assert!(opacity >= last, "opacity regressed at step {step}");
        last = opacity;
    }
}

#[test]
fn release_from_closed_requires_nearly_full_pull() {
    for edge in [Edge::Start, Edge::End] {
        let config = config(edge, ContentReaction::Scroll);
        let m = metrics(&config);
        let engine = PanelLayoutEngine::new(&config, &m);
        let at = |openness: f32| {
            let hidden = engine.hidden_left();
            let shown = engine.shown_left();
            hidden + (shown - hidden) * openness
        };

        // 40% open with threshold 0.25 falls back closed.
        assert!(!engine.release_target_open(at(0.4), false), "{edge:?}");
        // Inside the 25% band around open it commits.
        assert!(engine.release_target_open(at(0.8), false), "{edge:?}");
        assert!(engine.release_target_open(at(0.76), false), "{edge:?}");
    }
}

#[test]
fn release_from_open_requires_nearly_full_pull() {
    for edge in [Edge::Start, Edge::End] {
        let config = config(edge, ContentReaction::Scroll);
        let m = metrics(&config);
        let engine = PanelLayoutEngine::new(&config, &m);
        let at = |openness: f32| {
            let hidden = engine.hidden_left();
            let shown = engine.shown_left();
            hidden + (shown - hidden) * openness
        };

        // Pushed down to 30% open: not yet inside the band around closed,
        // stays open.
        assert!(engine.release_target_open(at(0.3), true), "{edge:?}");
        // Down to 20%: commits closed.
        assert!(!engine.release_target_open(at(0.2), true), "{edge:?}");
    }
}

#[test]
fn hit_testing_splits_panel_and_content() {
    let config = config(Edge::End, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    // Closed End panel exposes [875, 1000].
    assert!(engine.is_over_panel(900.0, false));
    assert!(!engine.is_over_panel(800.0, false));
    assert!(engine.is_over_content(800.0, false));
    // Open panel covers [250, 1000].
    assert!(engine.is_over_panel(300.0, true));
    assert!(engine.is_over_content(100.0, true));
}

#[test]
fn edge_region_arms_only_within_tolerance() {
    for edge in [Edge::Start, Edge::End] {
        let mut config = config(edge, ContentReaction::Scroll);
        config.set_drag_region_closed(DragRegion::Edge);
        config.set_edge_tolerance_px(24.0).unwrap();
        let m = metrics(&config);
        let engine = PanelLayoutEngine::new(&config, &m);

        let (inside, boundary, outside) = match edge {
            Edge::Start => (5.0, 24.0, 24.5),
            Edge::End => (995.0, 976.0, 975.5),
        };
        assert!(engine.drag_allowed(inside, false), "{edge:?}");
        assert!(engine.drag_allowed(boundary, false), "{edge:?}");
        assert!(!engine.drag_allowed(outside, false), "{edge:?}");
    }
}

#[test]
fn drag_region_policies() {
    let mut config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);

    config.set_drag_region_closed(DragRegion::Disabled);
    assert!(!PanelLayoutEngine::new(&config, &m).drag_allowed(60.0, false));

    config.set_drag_region_closed(DragRegion::PanelOnly);
    // Closed Start panel exposes [0, 125].
    assert!(PanelLayoutEngine::new(&config, &m).drag_allowed(60.0, false));
    assert!(!PanelLayoutEngine::new(&config, &m).drag_allowed(500.0, false));

    config.set_drag_region_closed(DragRegion::ContentOnly);
    assert!(!PanelLayoutEngine::new(&config, &m).drag_allowed(60.0, false));
    assert!(PanelLayoutEngine::new(&config, &m).drag_allowed(500.0, false));

    config.set_drag_region_closed(DragRegion::Both);
    assert!(PanelLayoutEngine::new(&config, &m).drag_allowed(500.0, false));
}

#[test]
fn animation_distance_is_signed_toward_the_target() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    // Mid-drag at left=-325, heading open: 325 to the right.
    assert_eq!(engine.animation_distance(-325.0, true), 325.0);
    // Heading back closed: 300 to the left.
    assert_eq!(engine.animation_distance(-325.0, false), -300.0);
}

#[test]
fn settle_duration_scales_with_speed() {
    let config = config(Edge::Start, ContentReaction::Scroll);
    let m = metrics(&config);
    let engine = PanelLayoutEngine::new(&config, &m);

    let fast = engine.settle_request(-325.0, true, Some(2.5));
    assert_eq!(fast.duration_ms, 130);
    let deliberate = engine.settle_request(-325.0, true, None);
    assert_eq!(
        deliberate.duration_ms,
        (325.0 / crate::animation::DEFAULT_SETTLE_SPEED_PX_MS).round() as u64
    );
}
