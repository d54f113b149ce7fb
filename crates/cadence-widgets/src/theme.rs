//! Shared theme constants for the cadence grid widgets
//!
//! Color tables and visual constants used by the step grid and the
//! indicator header. The group table is the *default* mapping; the grid
//! itself reads group colors from its injected `GridConfig`, so tests and
//! embedders can substitute a deterministic palette.

use iced::Color;

/// Group colors (8 distinct colors for the 8 step groups)
///
/// Stable mapping: group id N always renders with `GROUP_COLORS[N]`.
pub const GROUP_COLORS: [Color; 8] = [
    Color::from_rgb(1.0, 0.3, 0.3), // Red
    Color::from_rgb(1.0, 0.6, 0.0), // Orange
    Color::from_rgb(1.0, 1.0, 0.0), // Yellow
    Color::from_rgb(0.3, 1.0, 0.3), // Green
    Color::from_rgb(0.0, 0.8, 0.8), // Cyan
    Color::from_rgb(0.3, 0.3, 1.0), // Blue
    Color::from_rgb(0.8, 0.3, 0.8), // Purple
    Color::from_rgb(1.0, 0.5, 0.8), // Pink
];

/// Grid background
pub const GRID_BACKGROUND: Color = Color::from_rgb(0.1, 0.1, 0.12);

/// Indicator header strip background
pub const HEADER_BACKGROUND: Color = Color::from_rgb(0.15, 0.15, 0.18);

/// Empty cell slot fill
pub const CELL_SLOT: Color = Color::from_rgb(0.17, 0.17, 0.2);

/// Column separator lines
pub const CELL_BORDER: Color = Color::from_rgb(0.28, 0.28, 0.32);

/// Value-encoding bar in the non-group modes
pub const STEP_VALUE: Color = Color::from_rgb(0.3, 0.7, 0.9);

/// Cell label text
pub const LABEL: Color = Color::from_rgb(0.85, 0.85, 0.85);

/// Indicator header text
pub const HEADER_LABEL: Color = Color::from_rgb(0.7, 0.7, 0.75);

/// Playhead column highlight (translucent overlay)
pub const PLAYHEAD: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.18);

/// Alpha multiplier applied to disabled (ghost) steps
pub const DISABLED_ALPHA: f32 = 0.25;

/// Scale a color's alpha, used for the disabled ghost style
pub fn ghosted(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}
