//! Grid editor widgets for the cadence step sequencer
//!
//! This crate provides the canvas-based step grid plus the glue that keeps
//! it synchronized with a live `cadence_core::StepSequencer`.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! Following idiomatic iced patterns:
//!
//! - **State structs**: Pure data (`GridState`, `StepCell`, `StepIndicator`)
//!   recomputed from model change notifications, never mutated by drawing
//! - **View functions**: Take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: Handle custom rendering and event-to-callback
//!   translation; gesture state lives in the canvas `Program::State`
//!
//! ## Current Features
//!
//! - **Theme constants**: group color table and grid palette
//! - **Step grid**: mode-dependent cell rendering and drag/scroll editing
//! - **Subscription bridge**: sequencer change feed → iced `Subscription`

pub mod button_styles;
pub mod grid;
pub mod subscription;
pub mod theme;

// Re-export commonly used items
pub use theme::GROUP_COLORS;

pub use grid::{
    pitch_name, step_grid, CellVisual, GridCanvas, GridConfig, GridInteraction, GridMessage,
    GridState, Mode, StepCell, StepIndicator,
};

pub use subscription::change_subscription;
