//! Derived per-container-size pixel values.

use sidepane_geometry::Size;

use crate::config::PanelConfig;

/// Pixel values derived from the fractional configuration for one container
/// size, recomputed whenever the container or the fractions/caps change.
///
/// Invariant: `0 <= offset_px < panel_width_px <= container.width` whenever
/// the container has any width at all.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PanelMetrics {
    pub container: Size,
    /// Full width of the panel surface.
    pub panel_width_px: f32,
    /// Width of panel that stays exposed even when closed.
    pub offset_px: f32,
    /// Shadow width attached outside the panel's inner edge, owned by the
    /// rendering layer and treated as an additive constant here.
    pub shadow_px: f32,
    /// Width of the edge-decoration strip at the panel's inner edge.
    pub edge_decor_px: f32,
}

impl PanelMetrics {
    pub fn derive(config: &PanelConfig, container: Size, shadow_px: f32, edge_decor_px: f32) -> Self {
        let width = container.width;
        let mut panel = (config.panel_fraction() * width).round();
        if let Some(cap) = config.max_panel_width() {
            panel = panel.min(cap);
        }
        panel = panel.min(width);

        let mut offset = (config.offset_fraction() * width).round();
        if let Some(cap) = config.max_offset() {
            offset = offset.min(cap);
        }
        // Caps can invert the fractional ordering; the offset always yields.
        offset = offset.min((panel - 1.0).max(0.0));

        Self {
            container,
            panel_width_px: panel,
            offset_px: offset,
            shadow_px,
            edge_decor_px,
        }
    }

    /// Width of the content area: everything the closed panel does not
    /// permanently cover.
    pub fn content_width_px(&self) -> f32 {
        self.container.width - self.offset_px
    }

    /// Distance the panel moves between fully closed and fully open.
    pub fn travel_px(&self) -> f32 {
        self.panel_width_px - self.offset_px
    }
}
