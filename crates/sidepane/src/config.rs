//! Panel configuration: closed enums with stable integer codes and a
//! validated settings struct.

use std::fmt;

/// Which side of the container the panel is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    pub fn code(self) -> u8 {
        match self {
            Edge::Start => 0,
            Edge::End => 1,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(Edge::Start),
            1 => Ok(Edge::End),
            _ => Err(ConfigError::InvalidCode { field: "edge", code }),
        }
    }
}

/// How the content area reacts while the panel opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentReaction {
    /// Content keeps its width and translates with the panel.
    Scroll,
    /// Content's far edge stays pinned and its width shrinks.
    Resize,
}

impl ContentReaction {
    pub fn code(self) -> u8 {
        match self {
            ContentReaction::Scroll => 0,
            ContentReaction::Resize => 1,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(ContentReaction::Scroll),
            1 => Ok(ContentReaction::Resize),
            _ => Err(ConfigError::InvalidCode {
                field: "content_reaction",
                code,
            }),
        }
    }
}

/// Where a drag gesture is allowed to start.
///
/// `Edge` only makes sense while the panel is closed; using it for the
/// open-state policy is a configuration error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragRegion {
    Both,
    PanelOnly,
    ContentOnly,
    Disabled,
    Edge,
}

impl DragRegion {
    pub fn code(self) -> u8 {
        match self {
            DragRegion::Both => 0,
            DragRegion::PanelOnly => 1,
            DragRegion::ContentOnly => 2,
            DragRegion::Disabled => 3,
            DragRegion::Edge => 4,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, ConfigError> {
        match code {
            0 => Ok(DragRegion::Both),
            1 => Ok(DragRegion::PanelOnly),
            2 => Ok(DragRegion::ContentOnly),
            3 => Ok(DragRegion::Disabled),
            4 => Ok(DragRegion::Edge),
            _ => Err(ConfigError::InvalidCode {
                field: "drag_region",
                code,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    FractionOutOfRange { field: &'static str, value: f32 },
    PanelNotWiderThanOffset { panel: f32, offset: f32 },
    InvalidCap { field: &'static str, value: f32 },
    NegativeTolerance { value: f32 },
    EdgeRegionWhileOpen,
    InvalidCode { field: &'static str, code: u8 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FractionOutOfRange { field, value } => {
                write!(f, "{field} must be within [0, 1], got {value}")
            }
            ConfigError::PanelNotWiderThanOffset { panel, offset } => {
                write!(
                    f,
                    "panel_fraction ({panel}) must exceed offset_fraction ({offset})"
                )
            }
            ConfigError::InvalidCap { field, value } => {
                write!(f, "{field} must be at least 1px, got {value}")
            }
            ConfigError::NegativeTolerance { value } => {
                write!(f, "edge_tolerance_px must be non-negative, got {value}")
            }
            ConfigError::EdgeRegionWhileOpen => {
                write!(f, "DragRegion::Edge is not a valid open-state drag policy")
            }
            ConfigError::InvalidCode { field, code } => {
                write!(f, "invalid {field} code {code}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Immutable-per-layout-pass panel settings.
///
/// Fields are private so every mutation flows through a checked setter; the
/// controller re-derives pixel metrics after each successful change.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelConfig {
    edge: Edge,
    panel_fraction: f32,
    max_panel_width: Option<f32>,
    offset_fraction: f32,
    max_offset: Option<f32>,
    content_reaction: ContentReaction,
    scroll_ratio: f32,
    drag_threshold: f32,
    sensitivity: f32,
    drag_region_closed: DragRegion,
    drag_region_open: DragRegion,
    edge_tolerance_px: f32,
    overlay_color: u32,
    overlay_max_opacity: f32,
    open_on_panel_click: bool,
    close_on_content_click: bool,
    close_on_back: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            edge: Edge::Start,
            panel_fraction: 0.8,
            max_panel_width: None,
            offset_fraction: 0.0,
            max_offset: None,
            content_reaction: ContentReaction::Scroll,
            scroll_ratio: 0.5,
            drag_threshold: 0.25,
            sensitivity: 1.0,
            drag_region_closed: DragRegion::Both,
            drag_region_open: DragRegion::Both,
            edge_tolerance_px: 24.0,
            overlay_color: 0x9900_0000,
            overlay_max_opacity: 0.6,
            open_on_panel_click: true,
            close_on_content_click: true,
            close_on_back: true,
        }
    }
}

fn check_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { field, value })
    }
}

fn check_cap(field: &'static str, value: Option<f32>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v < 1.0 => Err(ConfigError::InvalidCap { field, value: v }),
        _ => Ok(()),
    }
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn panel_fraction(&self) -> f32 {
        self.panel_fraction
    }

    pub fn max_panel_width(&self) -> Option<f32> {
        self.max_panel_width
    }

    pub fn offset_fraction(&self) -> f32 {
        self.offset_fraction
    }

    pub fn max_offset(&self) -> Option<f32> {
        self.max_offset
    }

    pub fn content_reaction(&self) -> ContentReaction {
        self.content_reaction
    }

    pub fn scroll_ratio(&self) -> f32 {
        self.scroll_ratio
    }

    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn drag_region_closed(&self) -> DragRegion {
        self.drag_region_closed
    }

    pub fn drag_region_open(&self) -> DragRegion {
        self.drag_region_open
    }

    pub fn edge_tolerance_px(&self) -> f32 {
        self.edge_tolerance_px
    }

    pub fn overlay_color(&self) -> u32 {
        self.overlay_color
    }

    pub fn overlay_max_opacity(&self) -> f32 {
        self.overlay_max_opacity
    }

    pub fn open_on_panel_click(&self) -> bool {
        self.open_on_panel_click
    }

    pub fn close_on_content_click(&self) -> bool {
        self.close_on_content_click
    }

    pub fn close_on_back(&self) -> bool {
        self.close_on_back
    }

    pub fn set_edge(&mut self, edge: Edge) {
        self.edge = edge;
    }

    pub fn set_panel_fraction(&mut self, fraction: f32) -> Result<(), ConfigError> {
        check_fraction("panel_fraction", fraction)?;
        if fraction <= self.offset_fraction {
            return Err(ConfigError::PanelNotWiderThanOffset {
                panel: fraction,
                offset: self.offset_fraction,
            });
        }
        self.panel_fraction = fraction;
        Ok(())
    }

    pub fn set_max_panel_width(&mut self, cap: Option<f32>) -> Result<(), ConfigError> {
        check_cap("max_panel_width", cap)?;
        self.max_panel_width = cap;
        Ok(())
    }

    pub fn set_offset_fraction(&mut self, fraction: f32) -> Result<(), ConfigError> {
        check_fraction("offset_fraction", fraction)?;
        if fraction >= self.panel_fraction {
            return Err(ConfigError::PanelNotWiderThanOffset {
                panel: self.panel_fraction,
                offset: fraction,
            });
        }
        self.offset_fraction = fraction;
        Ok(())
    }

    pub fn set_max_offset(&mut self, cap: Option<f32>) -> Result<(), ConfigError> {
        check_cap("max_offset", cap)?;
        self.max_offset = cap;
        Ok(())
    }

    pub fn set_content_reaction(&mut self, reaction: ContentReaction) {
        self.content_reaction = reaction;
    }

    pub fn set_scroll_ratio(&mut self, ratio: f32) -> Result<(), ConfigError> {
        check_fraction("scroll_ratio", ratio)?;
        self.scroll_ratio = ratio;
        Ok(())
    }

    pub fn set_drag_threshold(&mut self, threshold: f32) -> Result<(), ConfigError> {
        check_fraction("drag_threshold", threshold)?;
        self.drag_threshold = threshold;
        Ok(())
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) -> Result<(), ConfigError> {
        check_fraction("sensitivity", sensitivity)?;
        self.sensitivity = sensitivity;
        Ok(())
    }

    pub fn set_drag_region_closed(&mut self, region: DragRegion) {
        self.drag_region_closed = region;
    }

    pub fn set_drag_region_open(&mut self, region: DragRegion) -> Result<(), ConfigError> {
        if region == DragRegion::Edge {
            return Err(ConfigError::EdgeRegionWhileOpen);
        }
        self.drag_region_open = region;
        Ok(())
    }

    pub fn set_edge_tolerance_px(&mut self, tolerance: f32) -> Result<(), ConfigError> {
        if tolerance < 0.0 {
            return Err(ConfigError::NegativeTolerance { value: tolerance });
        }
        self.edge_tolerance_px = tolerance;
        Ok(())
    }

    /// ARGB color of the content overlay; opaque to this crate, carried for
    /// the rendering layer and the persisted state.
    pub fn set_overlay_color(&mut self, argb: u32) {
        self.overlay_color = argb;
    }

    pub fn set_overlay_max_opacity(&mut self, opacity: f32) -> Result<(), ConfigError> {
        check_fraction("overlay_max_opacity", opacity)?;
        self.overlay_max_opacity = opacity;
        Ok(())
    }

    pub fn set_open_on_panel_click(&mut self, enabled: bool) {
        self.open_on_panel_click = enabled;
    }

    pub fn set_close_on_content_click(&mut self, enabled: bool) {
        self.close_on_content_click = enabled;
    }

    pub fn set_close_on_back(&mut self, enabled: bool) {
        self.close_on_back = enabled;
    }

    /// Drag policy for the given rest state.
    pub fn drag_region(&self, open: bool) -> DragRegion {
        if open {
            self.drag_region_open
        } else {
            self.drag_region_closed
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
