//! The panel state machine: pointer dispatch, click/drag/release
//! resolution, and the handoff to the external animation driver.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use sidepane_geometry::{Rect, Size};
use sidepane_gesture::{GestureTracker, PointerPhase, PointerSample};

use crate::animation::AnimationRequest;
use crate::config::{ConfigError, PanelConfig};
use crate::layout::PanelLayoutEngine;
use crate::metrics::PanelMetrics;

/// Minimal capability interface over an externally-owned view: the
/// controller only ever reads and writes its frame. Composition over the
/// source design's view-subclass inheritance.
pub trait ExtentHandle {
    fn frame(&self) -> Rect;
    fn set_frame(&mut self, frame: Rect);
}

/// Observable controller state. Exactly one is active at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelState {
    Closed,
    Open,
    Dragging,
    Animating { target_open: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelError {
    /// A geometry-affecting operation ran before both extent handles were
    /// attached.
    NotAttached { missing: &'static str },
    Config(ConfigError),
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::NotAttached { missing } => {
                write!(f, "{missing} extent is not attached")
            }
            PanelError::Config(err) => write!(f, "configuration rejected: {err}"),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::Config(err) => Some(err),
            PanelError::NotAttached { .. } => None,
        }
    }
}

impl From<ConfigError> for PanelError {
    fn from(err: ConfigError) -> Self {
        PanelError::Config(err)
    }
}

pub type ListenerId = u64;

type Listener = Rc<dyn Fn(PanelState)>;
type Driver = Rc<dyn Fn(AnimationRequest)>;
type Handle = Rc<RefCell<dyn ExtentHandle>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Rest,
    Dragging,
    Animating { target_open: bool },
}

/// Single-threaded, event-driven orchestrator of the gesture tracker and
/// the layout engine. All transitions funnel through pointer dispatch, the
/// explicit open/close calls, and the animation-completion callback; there
/// is deliberately no other way to mutate the runtime state.
pub struct PanelController {
    config: PanelConfig,
    metrics: PanelMetrics,
    container: Size,
    shadow_px: f32,
    edge_decor_px: f32,

    panel_open: bool,
    phase: Phase,
    tracker: GestureTracker,
    press_position: Option<f32>,
    press_allowed: bool,
    drag_start_open: bool,

    panel: Option<Handle>,
    content: Option<Handle>,
    driver: Option<Driver>,
    listeners: SmallVec<[(ListenerId, Listener); 2]>,
    next_listener_id: ListenerId,
    needs_layout: bool,
}

impl PanelController {
    pub fn new(config: PanelConfig) -> Self {
        let tracker = GestureTracker::new(config.sensitivity());
        let metrics = PanelMetrics::derive(&config, Size::ZERO, 0.0, 0.0);
        Self {
            config,
            metrics,
            container: Size::ZERO,
            shadow_px: 0.0,
            edge_decor_px: 0.0,
            panel_open: false,
            phase: Phase::Rest,
            tracker,
            press_position: None,
            press_allowed: false,
            drag_start_open: false,
            panel: None,
            content: None,
            driver: None,
            listeners: SmallVec::new(),
            next_listener_id: 0,
            needs_layout: false,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn metrics(&self) -> &PanelMetrics {
        &self.metrics
    }

    pub fn engine(&self) -> PanelLayoutEngine<'_> {
        PanelLayoutEngine::new(&self.config, &self.metrics)
    }

    pub fn state(&self) -> PanelState {
        match self.phase {
            Phase::Rest => {
                if self.panel_open {
                    PanelState::Open
                } else {
                    PanelState::Closed
                }
            }
            Phase::Dragging => PanelState::Dragging,
            Phase::Animating { target_open } => PanelState::Animating { target_open },
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel_open
    }

    // ---- wiring -----------------------------------------------------------

    pub fn attach_panel(&mut self, handle: Handle) {
        self.panel = Some(handle);
        self.reapply_if_resting();
    }

    pub fn attach_content(&mut self, handle: Handle) {
        self.content = Some(handle);
        self.reapply_if_resting();
    }

    pub fn set_animation_driver(&mut self, driver: Driver) {
        self.driver = Some(driver);
    }

    pub fn add_listener(&mut self, listener: Listener) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    // ---- configuration ----------------------------------------------------

    /// Runs a batch of checked config mutations, then re-derives the pixel
    /// metrics and raises a relayout request. Nothing is re-derived
    /// implicitly anywhere else.
    pub fn configure(
        &mut self,
        mutate: impl FnOnce(&mut PanelConfig) -> Result<(), ConfigError>,
    ) -> Result<(), PanelError> {
        mutate(&mut self.config)?;
        self.tracker.set_sensitivity(self.config.sensitivity());
        self.rederive();
        Ok(())
    }

    /// Opaque decor extents supplied by the rendering layer: the panel's
    /// shadow width and the edge-decoration strip width.
    pub fn set_decor_extents(&mut self, shadow_px: f32, edge_decor_px: f32) {
        self.shadow_px = shadow_px;
        self.edge_decor_px = edge_decor_px;
        self.rederive();
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.container = Size::new(width, height);
        self.rederive();
    }

    /// True while a config or size change awaits a host layout pass.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn take_layout_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_layout)
    }

    fn rederive(&mut self) {
        self.metrics =
            PanelMetrics::derive(&self.config, self.container, self.shadow_px, self.edge_decor_px);
        self.needs_layout = true;
        self.reapply_if_resting();
    }

    fn reapply_if_resting(&mut self) {
        if self.phase == Phase::Rest && self.panel.is_some() && self.content.is_some() {
            let rect = self.engine().panel_rect(self.panel_open);
            // Both handles just checked present.
            let _ = self.apply_frames(&rect);
        }
    }

    // ---- pointer dispatch -------------------------------------------------

    pub fn handle_pointer(&mut self, sample: PointerSample) -> Result<(), PanelError> {
        self.require_attached()?;
        match sample.phase {
            PointerPhase::Down => self.on_down(sample),
            PointerPhase::Move => self.on_move(sample),
            PointerPhase::Up => self.on_up(sample),
            PointerPhase::Cancel => self.on_cancel(),
        }
    }

    fn on_down(&mut self, sample: PointerSample) -> Result<(), PanelError> {
        if self.phase != Phase::Rest {
            log::trace!("pointer down ignored in {:?}", self.phase);
            return Ok(());
        }
        self.tracker.reset();
        self.tracker.update(sample.position, sample.timestamp_ms);
        self.press_position = Some(sample.position);
        self.press_allowed = self.engine().drag_allowed(sample.position, self.panel_open);
        Ok(())
    }

    fn on_move(&mut self, sample: PointerSample) -> Result<(), PanelError> {
        if matches!(self.phase, Phase::Animating { .. }) || self.press_position.is_none() {
            return Ok(());
        }
        self.tracker.update(sample.position, sample.timestamp_ms);

        if self.phase == Phase::Rest
            && self.tracker.has_reached_threshold()
            && self.press_allowed
        {
            self.drag_start_open = self.panel_open;
            self.phase = Phase::Dragging;
            log::debug!(
                "drag started from {} state",
                if self.panel_open { "open" } else { "closed" }
            );
        }

        if self.phase == Phase::Dragging {
            let rect = self
                .engine()
                .panel_rect_dragging(self.tracker.distance(), self.drag_start_open);
            self.apply_frames(&rect)?;
        }
        Ok(())
    }

    fn on_up(&mut self, sample: PointerSample) -> Result<(), PanelError> {
        let result = match self.phase {
            Phase::Dragging => {
                let left = {
                    let frame = self.panel_frame()?;
                    self.engine().panel_left_of(&frame)
                };
                let target = self.engine().release_target_open(left, self.drag_start_open);
                let speed = self.tracker.speed(sample.timestamp_ms);
                self.begin_settle(left, target, speed)
            }
            Phase::Rest => self.resolve_click(),
            Phase::Animating { .. } => Ok(()),
        };
        self.press_position = None;
        result
    }

    fn on_cancel(&mut self) -> Result<(), PanelError> {
        let result = if self.phase == Phase::Dragging {
            // Aborted gesture settles back where it started.
            let left = {
                let frame = self.panel_frame()?;
                self.engine().panel_left_of(&frame)
            };
            log::debug!("drag cancelled, settling back");
            self.begin_settle(left, self.drag_start_open, None)
        } else {
            Ok(())
        };
        self.press_position = None;
        result
    }

    fn resolve_click(&mut self) -> Result<(), PanelError> {
        if self.tracker.has_reached_threshold() {
            // Armed but region-rejected: a dead gesture, not a click.
            return Ok(());
        }
        let Some(press) = self.press_position else {
            return Ok(());
        };
        let engine = self.engine();
        if !self.panel_open
            && self.config.open_on_panel_click()
            && engine.is_over_panel(press, false)
        {
            log::debug!("panel click, opening");
            let left = engine.hidden_left();
            return self.begin_settle(left, true, None);
        }
        if self.panel_open
            && self.config.close_on_content_click()
            && engine.is_over_content(press, true)
        {
            log::debug!("content click, closing");
            let left = engine.shown_left();
            return self.begin_settle(left, false, None);
        }
        Ok(())
    }

    // ---- explicit transitions ---------------------------------------------

    pub fn open(&mut self) -> Result<(), PanelError> {
        self.set_open(true)
    }

    pub fn close(&mut self) -> Result<(), PanelError> {
        self.set_open(false)
    }

    pub fn toggle(&mut self) -> Result<(), PanelError> {
        let target = !self.panel_open;
        self.set_open(target)
    }

    /// Starts a settle to the requested rest state. Silent no-op when
    /// already there, or while a gesture or animation is in flight: the
    /// first in-flight operation always completes uninterrupted.
    pub fn set_open(&mut self, open: bool) -> Result<(), PanelError> {
        self.require_attached()?;
        if self.phase != Phase::Rest {
            log::debug!("set_open({open}) ignored in {:?}", self.phase);
            return Ok(());
        }
        if self.panel_open == open {
            return Ok(());
        }
        let left = if self.panel_open {
            self.engine().shown_left()
        } else {
            self.engine().hidden_left()
        };
        self.begin_settle(left, open, None)
    }

    /// Virtual back input: closes the panel when it is open and the config
    /// enables it. Returns whether the input was consumed.
    pub fn back_pressed(&mut self) -> Result<bool, PanelError> {
        if self.phase == Phase::Rest && self.panel_open && self.config.close_on_back() {
            self.close()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Completion callback for the external animation driver; must be
    /// invoked exactly once per emitted request. This is the only place the
    /// rest state flips and listeners fire.
    pub fn animation_finished(&mut self) -> Result<(), PanelError> {
        match self.phase {
            Phase::Animating { target_open } => self.finish_settle(target_open),
            _ => {
                log::warn!("spurious animation_finished in {:?}", self.phase);
                Ok(())
            }
        }
    }

    // ---- queries ----------------------------------------------------------

    pub fn panel_rest_rect(&self) -> Rect {
        self.engine().panel_rect(self.panel_open)
    }

    pub fn content_rest_rect(&self) -> Rect {
        self.engine().content_rect(self.panel_open)
    }

    /// Overlay opacity for the current panel position: live mid-drag, the
    /// rest value otherwise.
    pub fn overlay_opacity(&self) -> f32 {
        let engine = self.engine();
        let rest = if self.panel_open {
            engine.shown_left()
        } else {
            engine.hidden_left()
        };
        let left = match (&self.phase, &self.panel) {
            (Phase::Dragging, Some(panel)) => engine.panel_left_of(&panel.borrow().frame()),
            _ => rest,
        };
        engine.overlay_opacity(left)
    }

    // ---- internals --------------------------------------------------------

    fn require_attached(&self) -> Result<(), PanelError> {
        if self.panel.is_none() {
            return Err(PanelError::NotAttached { missing: "panel" });
        }
        if self.content.is_none() {
            return Err(PanelError::NotAttached { missing: "content" });
        }
        Ok(())
    }

    fn panel_frame(&self) -> Result<Rect, PanelError> {
        match &self.panel {
            Some(panel) => Ok(panel.borrow().frame()),
            None => Err(PanelError::NotAttached { missing: "panel" }),
        }
    }

    fn apply_frames(&self, panel_rect: &Rect) -> Result<(), PanelError> {
        let content_rect = self.engine().content_rect_for_panel(panel_rect);
        match (&self.panel, &self.content) {
            (Some(panel), Some(content)) => {
                panel.borrow_mut().set_frame(*panel_rect);
                content.borrow_mut().set_frame(content_rect);
                Ok(())
            }
            (None, _) => Err(PanelError::NotAttached { missing: "panel" }),
            (_, None) => Err(PanelError::NotAttached { missing: "content" }),
        }
    }

    fn begin_settle(
        &mut self,
        from_left: f32,
        target_open: bool,
        speed_px_ms: Option<f32>,
    ) -> Result<(), PanelError> {
        let request = self.engine().settle_request(from_left, target_open, speed_px_ms);
        match self.driver.clone() {
            Some(driver) => {
                self.phase = Phase::Animating { target_open };
                log::debug!(
                    "settle to {}: {:+}px over {}ms",
                    if target_open { "open" } else { "closed" },
                    request.distance_px,
                    request.duration_ms
                );
                driver(request);
                Ok(())
            }
            // No driver registered: snap straight to the rest state.
            None => self.finish_settle(target_open),
        }
    }

    fn finish_settle(&mut self, target_open: bool) -> Result<(), PanelError> {
        self.panel_open = target_open;
        self.phase = Phase::Rest;
        let rect = self.engine().panel_rect(self.panel_open);
        self.apply_frames(&rect)?;
        log::debug!(
            "panel settled {}",
            if target_open { "open" } else { "closed" }
        );
        let state = self.state();
        let listeners: Vec<Listener> =
            self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(state);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
