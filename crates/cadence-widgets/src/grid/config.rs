//! Grid display and gesture configuration
//!
//! Geometry, drag sensitivity, and the group color table are injected
//! through this struct rather than read from process-wide constants, so
//! embedders can tune them and tests can construct deterministic grids.

use iced::Color;

use cadence_core::GROUP_COUNT;

use crate::theme;

/// Injected configuration for a step grid
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Fixed column width per step in pixels
    pub step_width: f32,
    /// Height of the step cell row
    pub row_height: f32,
    /// Height of the indicator header strip
    pub header_height: f32,
    /// Inset between a cell's slot and its value-encoding rectangle
    pub cell_padding: f32,
    /// Vertical drag sensitivity: pixels per one parameter unit
    pub drag_pixels_per_unit: f32,
    /// Duration change per horizontal drag unit (slot fraction)
    pub duration_per_unit: f32,
    /// Pixel-line equivalence for wheel deltas reported in pixels
    pub scroll_pixels_per_notch: f32,
    /// Press/release displacement under which a gesture counts as a click
    pub click_slop: f32,
    /// Stable group id → color mapping
    pub group_colors: [Color; GROUP_COUNT as usize],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            step_width: 56.0,
            row_height: 120.0,
            header_height: 26.0,
            cell_padding: 3.0,
            drag_pixels_per_unit: 8.0,
            duration_per_unit: 0.05,
            scroll_pixels_per_notch: 20.0,
            click_slop: 3.0,
            group_colors: theme::GROUP_COLORS,
        }
    }
}

impl GridConfig {
    /// Color for a group id (out-of-table ids wrap, they never panic)
    pub fn group_color(&self, group: u8) -> Color {
        self.group_colors[group as usize % self.group_colors.len()]
    }
}
