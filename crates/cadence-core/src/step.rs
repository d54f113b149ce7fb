//! Step - one slot in a sequencer pattern
//!
//! A step carries the per-slot performance parameters the grid editor
//! manipulates. Every mutator clamps to the parameter's valid range and
//! reports whether the stored value actually moved, so callers can tell a
//! real edit from an at-the-boundary no-op. Adjusting a value already at
//! its bound leaves it there; it is never an error.

use serde::{Deserialize, Serialize};

/// Note number bounds (MIDI range)
pub const PITCH_MIN: u8 = 0;
pub const PITCH_MAX: u8 = 127;

/// Velocity bounds (MIDI range)
pub const VELOCITY_MIN: u8 = 0;
pub const VELOCITY_MAX: u8 = 127;

/// Octave shift bounds, relative to the step's pitch
pub const OCTAVE_MIN: i8 = -4;
pub const OCTAVE_MAX: i8 = 4;

/// Duration bounds, as a fraction of the step slot
pub const DURATION_MIN: f32 = 0.0;
pub const DURATION_MAX: f32 = 1.0;

/// Number of step groups
pub const GROUP_COUNT: u8 = 8;

/// One slot in a sequencer pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Note number (0-127)
    pub pitch: u8,
    /// Velocity (0-127)
    pub velocity: u8,
    /// Gate length as a fraction of the step slot (0.0-1.0)
    pub duration: f32,
    /// Octave shift applied on top of the pitch (-4..=4)
    pub octave: i8,
    /// Whether the step sounds at all
    pub enabled: bool,
    /// Group id (0..GROUP_COUNT)
    pub group: u8,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            pitch: 60, // middle C
            velocity: 100,
            duration: 0.9,
            octave: 0,
            enabled: false,
            group: 0,
        }
    }
}

impl Step {
    /// Adjust the pitch by `amt` semitones, clamped to the MIDI range.
    /// Returns true if the stored value moved.
    pub fn adjust_pitch(&mut self, amt: i32) -> bool {
        let next = (self.pitch as i32 + amt).clamp(PITCH_MIN as i32, PITCH_MAX as i32) as u8;
        let moved = next != self.pitch;
        self.pitch = next;
        moved
    }

    /// Adjust the velocity by `amt`, clamped to the MIDI range.
    pub fn adjust_velocity(&mut self, amt: i32) -> bool {
        let next =
            (self.velocity as i32 + amt).clamp(VELOCITY_MIN as i32, VELOCITY_MAX as i32) as u8;
        let moved = next != self.velocity;
        self.velocity = next;
        moved
    }

    /// Adjust the gate length by `amt` (a slot fraction), clamped to 0.0-1.0.
    pub fn adjust_duration(&mut self, amt: f32) -> bool {
        let next = (self.duration + amt).clamp(DURATION_MIN, DURATION_MAX);
        let moved = next != self.duration;
        self.duration = next;
        moved
    }

    /// Adjust the octave shift by `amt`, clamped to -4..=4.
    pub fn adjust_octave(&mut self, amt: i32) -> bool {
        let next = (self.octave as i32 + amt).clamp(OCTAVE_MIN as i32, OCTAVE_MAX as i32) as i8;
        let moved = next != self.octave;
        self.octave = next;
        moved
    }

    /// Adjust the group id by `amt`, clamped to 0..GROUP_COUNT.
    pub fn adjust_group(&mut self, amt: i32) -> bool {
        let next = (self.group as i32 + amt).clamp(0, GROUP_COUNT as i32 - 1) as u8;
        let moved = next != self.group;
        self.group = next;
        moved
    }

    /// Flip the enabled flag. Always a real edit.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_adjust_is_monotonic_and_clamped() {
        let mut step = Step::default();
        assert!(step.adjust_pitch(-2));
        assert_eq!(step.pitch, 58);

        // Pile on far more than the range allows; the value pins at the bound
        assert!(step.adjust_pitch(1000));
        assert_eq!(step.pitch, PITCH_MAX);

        // Already at max: a further increase is a clean no-op
        assert!(!step.adjust_pitch(1));
        assert_eq!(step.pitch, PITCH_MAX);
    }

    #[test]
    fn velocity_pins_at_both_bounds() {
        let mut step = Step::default();
        step.adjust_velocity(-1000);
        assert_eq!(step.velocity, VELOCITY_MIN);
        assert!(!step.adjust_velocity(-1));

        step.adjust_velocity(1000);
        assert_eq!(step.velocity, VELOCITY_MAX);
        assert!(!step.adjust_velocity(1));
    }

    #[test]
    fn duration_clamps_to_slot_fraction() {
        let mut step = Step::default();
        assert!(step.adjust_duration(0.05));
        assert!((step.duration - 0.95).abs() < 1e-6);

        step.adjust_duration(10.0);
        assert_eq!(step.duration, DURATION_MAX);
        assert!(!step.adjust_duration(0.01));

        step.adjust_duration(-10.0);
        assert_eq!(step.duration, DURATION_MIN);
    }

    #[test]
    fn octave_and_group_stay_in_range() {
        let mut step = Step::default();
        step.adjust_octave(100);
        assert_eq!(step.octave, OCTAVE_MAX);
        step.adjust_octave(-100);
        assert_eq!(step.octave, OCTAVE_MIN);

        step.adjust_group(100);
        assert_eq!(step.group, GROUP_COUNT - 1);
        step.adjust_group(-100);
        assert_eq!(step.group, 0);
    }

    #[test]
    fn toggle_flips_enabled() {
        let mut step = Step::default();
        assert!(!step.enabled);
        step.toggle();
        assert!(step.enabled);
        step.toggle();
        assert!(!step.enabled);
    }
}
