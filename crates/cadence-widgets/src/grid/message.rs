//! Edit requests published by the grid canvas
//!
//! The canvas never mutates the sequencer itself; it publishes one of these
//! and the application applies it. Amounts are already quantized to whole
//! gesture units; the model clamps them to the parameter's range.

/// An edit request for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridMessage {
    /// Change a step's pitch by a number of semitones
    AdjustPitch(usize, i32),
    /// Change a step's velocity
    AdjustVelocity(usize, i32),
    /// Change a step's gate length by a slot fraction
    AdjustDuration(usize, f32),
    /// Change a step's octave shift
    AdjustOctave(usize, i32),
    /// Change a step's group id
    AdjustGroup(usize, i32),
    /// Flip a step's enabled flag (click without drag)
    ToggleStep(usize),
}
