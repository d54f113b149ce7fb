//! Step grid widget
//!
//! The central editing surface: one canvas drawing a header of numbered
//! step indicators above a row of step cells, one cell per sequencer step.
//!
//! ## Layout
//!
//! ```text
//! [▾1] [▾2] [▾3] [▾4] ... [▾16]   <- Indicator header (1-based, group tint)
//! ┌───┬───┬───┬───┬ ... ┬────┐
//! │ ▓ │   │ ▓ │ ▓ │     │    │    <- Step cells (encoding depends on Mode)
//! │C4 │C4 │D#4│C4 │     │    │
//! └───┴───┴───┴───┴ ... ┴────┘
//!         ^ playhead column highlighted while playing
//! ```
//!
//! - X axis (columns): step index, fixed width per step
//! - What a cell *draws* and what a drag/scroll *edits* both follow the
//!   active [`Mode`]
//! - Edits are published as [`GridMessage`]s; the application applies them
//!   to the sequencer and the resulting change notification refreshes the
//!   cell, so the model stays the single source of truth

pub mod config;
pub mod message;
pub mod state;
pub mod view;

mod cell;
mod indicator;

pub use cell::{pitch_name, CellVisual, StepCell};
pub use config::GridConfig;
pub use indicator::StepIndicator;
pub use message::GridMessage;
pub use state::GridState;
pub use view::{step_grid, GridCanvas, GridInteraction};

/// The parameter dimension gestures edit and cells encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Velocity,
    Pitch,
    Duration,
    Octave,
    Group,
}

impl Mode {
    /// All modes, in mode-selector order
    pub const ALL: [Mode; 5] = [
        Mode::Velocity,
        Mode::Pitch,
        Mode::Duration,
        Mode::Octave,
        Mode::Group,
    ];

    /// Button label for the mode selector
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Velocity => "Velocity",
            Mode::Pitch => "Pitch",
            Mode::Duration => "Duration",
            Mode::Octave => "Octave",
            Mode::Group => "Group",
        }
    }
}
