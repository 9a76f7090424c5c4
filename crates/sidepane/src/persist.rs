//! Flat ordered field-list codec for the persisted panel state.
//!
//! The host treats the blob as opaque; the contract is a fixed field order
//! with enum fields stored as their integer codes, little-endian `f32` for
//! scalars, and a presence byte ahead of each optional cap.

use std::fmt;

use crate::config::{ConfigError, ContentReaction, DragRegion, Edge, PanelConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The blob ended before the named field.
    Truncated { field: &'static str },
    /// An enum field carried an integer outside its closed set.
    InvalidCode { field: &'static str, code: u8 },
    /// A flag byte was neither 0 nor 1.
    InvalidFlag { field: &'static str, value: u8 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { field } => {
                write!(f, "saved state truncated before {field}")
            }
            DecodeError::InvalidCode { field, code } => {
                write!(f, "saved state field {field} has invalid code {code}")
            }
            DecodeError::InvalidFlag { field, value } => {
                write!(f, "saved state flag {field} has invalid value {value}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Everything needed to rebuild the configuration and the rest state after
/// a process restart.
#[derive(Clone, Debug, PartialEq)]
pub struct SavedState {
    pub edge: Edge,
    pub panel_fraction: f32,
    pub max_panel_width: Option<f32>,
    pub offset_fraction: f32,
    pub max_offset: Option<f32>,
    pub content_reaction: ContentReaction,
    pub scroll_ratio: f32,
    pub drag_threshold: f32,
    pub sensitivity: f32,
    pub drag_region_closed: DragRegion,
    pub drag_region_open: DragRegion,
    pub edge_tolerance_px: f32,
    pub overlay_color: u32,
    pub overlay_max_opacity: f32,
    pub panel_open: bool,
}

impl SavedState {
    pub fn capture(config: &PanelConfig, panel_open: bool) -> Self {
        Self {
            edge: config.edge(),
            panel_fraction: config.panel_fraction(),
            max_panel_width: config.max_panel_width(),
            offset_fraction: config.offset_fraction(),
            max_offset: config.max_offset(),
            content_reaction: config.content_reaction(),
            scroll_ratio: config.scroll_ratio(),
            drag_threshold: config.drag_threshold(),
            sensitivity: config.sensitivity(),
            drag_region_closed: config.drag_region_closed(),
            drag_region_open: config.drag_region_open(),
            edge_tolerance_px: config.edge_tolerance_px(),
            overlay_color: config.overlay_color(),
            overlay_max_opacity: config.overlay_max_opacity(),
            panel_open,
        }
    }

    /// Rebuilds a validated configuration plus the rest state. Validation
    /// runs through the checked setters, so a blob carrying inconsistent
    /// fractions is rejected the same way a live misconfiguration is.
    pub fn restore(&self) -> Result<(PanelConfig, bool), ConfigError> {
        let mut config = PanelConfig::new();
        config.set_edge(self.edge);
        // Offset is lowered before the panel fraction moves so the
        // panel > offset cross-check holds at every step.
        config.set_offset_fraction(0.0)?;
        config.set_panel_fraction(self.panel_fraction)?;
        config.set_offset_fraction(self.offset_fraction)?;
        config.set_max_panel_width(self.max_panel_width)?;
        config.set_max_offset(self.max_offset)?;
        config.set_content_reaction(self.content_reaction);
        config.set_scroll_ratio(self.scroll_ratio)?;
        config.set_drag_threshold(self.drag_threshold)?;
        config.set_sensitivity(self.sensitivity)?;
        config.set_drag_region_closed(self.drag_region_closed);
        config.set_drag_region_open(self.drag_region_open)?;
        config.set_edge_tolerance_px(self.edge_tolerance_px)?;
        config.set_overlay_color(self.overlay_color);
        config.set_overlay_max_opacity(self.overlay_max_opacity)?;
        Ok((config, self.panel_open))
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.code(self.edge.code());
        w.f32(self.panel_fraction);
        w.cap(self.max_panel_width);
        w.f32(self.offset_fraction);
        w.cap(self.max_offset);
        w.code(self.content_reaction.code());
        w.f32(self.scroll_ratio);
        w.f32(self.drag_threshold);
        w.f32(self.sensitivity);
        w.code(self.drag_region_closed.code());
        w.code(self.drag_region_open.code());
        w.f32(self.edge_tolerance_px);
        w.u32(self.overlay_color);
        w.f32(self.overlay_max_opacity);
        w.code(self.panel_open as u8);
        w.out
    }

    pub fn decode(blob: &[u8]) -> Result<Self, DecodeError> {
        let mut r = Reader { input: blob };
        let state = Self {
            edge: Edge::from_code(r.code("edge")?).map_err(invalid_code("edge"))?,
            panel_fraction: r.f32("panel_fraction")?,
            max_panel_width: r.cap("max_panel_width")?,
            offset_fraction: r.f32("offset_fraction")?,
            max_offset: r.cap("max_offset")?,
            content_reaction: ContentReaction::from_code(r.code("content_reaction")?)
                .map_err(invalid_code("content_reaction"))?,
            scroll_ratio: r.f32("scroll_ratio")?,
            drag_threshold: r.f32("drag_threshold")?,
            sensitivity: r.f32("sensitivity")?,
            drag_region_closed: DragRegion::from_code(r.code("drag_region_closed")?)
                .map_err(invalid_code("drag_region_closed"))?,
            drag_region_open: DragRegion::from_code(r.code("drag_region_open")?)
                .map_err(invalid_code("drag_region_open"))?,
            edge_tolerance_px: r.f32("edge_tolerance_px")?,
            overlay_color: r.u32("overlay_color")?,
            overlay_max_opacity: r.f32("overlay_max_opacity")?,
            panel_open: r.flag("panel_open")?,
        };
        Ok(state)
    }
}

fn invalid_code(field: &'static str) -> impl Fn(ConfigError) -> DecodeError {
    move |err| match err {
        ConfigError::InvalidCode { code, .. } => DecodeError::InvalidCode { field, code },
        // from_code only ever fails with InvalidCode.
        _ => DecodeError::InvalidCode { field, code: u8::MAX },
    }
}

#[derive(Default)]
struct Writer {
    out: Vec<u8>,
}

impl Writer {
    fn code(&mut self, code: u8) {
        self.out.push(code);
    }

    fn f32(&mut self, value: f32) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    fn u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_le_bytes());
    }

    fn cap(&mut self, cap: Option<f32>) {
        match cap {
            Some(value) => {
                self.code(1);
                self.f32(value);
            }
            None => self.code(0),
        }
    }
}

struct Reader<'a> {
    input: &'a [u8],
}

impl Reader<'_> {
    fn take(&mut self, n: usize, field: &'static str) -> Result<&[u8], DecodeError> {
        if self.input.len() < n {
            return Err(DecodeError::Truncated { field });
        }
        let (head, rest) = self.input.split_at(n);
        self.input = rest;
        Ok(head)
    }

    fn code(&mut self, field: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, field)?[0])
    }

    fn f32(&mut self, field: &'static str) -> Result<f32, DecodeError> {
        let bytes = self.take(4, field)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let bytes = self.take(4, field)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn flag(&mut self, field: &'static str) -> Result<bool, DecodeError> {
        match self.code(field)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidFlag { field, value }),
        }
    }

    fn cap(&mut self, field: &'static str) -> Result<Option<f32>, DecodeError> {
        if self.flag(field)? {
            Ok(Some(self.f32(field)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "tests/persist_tests.rs"]
mod tests;
