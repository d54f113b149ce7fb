//! Application messages for cadence-seq
//!
//! All message types that can be dispatched in the editor application.

use cadence_core::SequencerChange;
use cadence_widgets::{GridMessage, Mode};

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Tick for the playback-position poll (only runs while mapped)
    Tick,
    /// A change notification from the sequencer model
    SequencerChanged(SequencerChange),
    /// An edit request published by the grid canvas
    Grid(GridMessage),
    /// Mode selector clicked
    SetMode(Mode),
    /// Start/stop playback
    TogglePlay,
    /// Materialize the current pattern as a region
    ExportRegion,
    /// Append a step to the pattern
    AddStep,
    /// Drop the last step from the pattern
    RemoveStep,
    /// Window gained or lost focus; gates the playback poll
    Focused(bool),
}
