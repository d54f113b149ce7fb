//! Step cell - one step's visual encoding and cached geometry
//!
//! A cell's rendered geometry is a pure function of (step snapshot, mode,
//! slot, config). The cell caches the derived [`CellVisual`] and re-derives
//! it only when its step changes (via a model notification) or the grid's
//! mode switches; a local edit never repaints the cell directly.

use iced::{Color, Point, Rectangle};

use cadence_core::{Step, DURATION_MAX, OCTAVE_MAX, OCTAVE_MIN, PITCH_MAX, VELOCITY_MAX};

use super::{GridConfig, Mode};
use crate::theme;

/// Thickness of the pitch-position bar
const PITCH_BAR_HEIGHT: f32 = 6.0;

/// Side of the square octave marker
const OCTAVE_MARKER_SIZE: f32 = 8.0;

/// Label text size inside a cell
pub(super) const CELL_LABEL_SIZE: f32 = 12.0;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Note-name label for a MIDI pitch ("C4" for 60)
pub fn pitch_name(pitch: u8) -> String {
    let name = NOTE_NAMES[pitch as usize % 12];
    let octave = pitch as i32 / 12 - 1;
    format!("{}{}", name, octave)
}

/// Derived geometry and styling for one cell under one mode
#[derive(Debug, Clone, PartialEq)]
pub struct CellVisual {
    /// Slot background fill
    pub slot_fill: Color,
    /// Value-encoding rectangle within the slot
    pub value_rect: Rectangle,
    pub value_fill: Color,
    /// Centered under the value encoding
    pub label: String,
    pub label_color: Color,
}

/// One step's view: slot geometry plus the cached visual
#[derive(Debug, Clone)]
pub struct StepCell {
    /// Index of the step this cell is bound to
    pub index: usize,
    /// Snapshot of the bound step, replaced on change notifications
    pub step: Step,
    /// The cell's slot rectangle in grid coordinates
    pub slot: Rectangle,
    /// Cached visual, re-derived on step or mode change
    pub visual: CellVisual,
}

impl StepCell {
    pub fn new(index: usize, step: Step, slot: Rectangle, mode: Mode, config: &GridConfig) -> Self {
        Self {
            index,
            step,
            slot,
            visual: derive_visual(&step, mode, slot, config),
        }
    }

    /// Replace the step snapshot and re-derive the visual
    pub fn set_step(&mut self, step: Step, mode: Mode, config: &GridConfig) {
        self.step = step;
        self.refresh(mode, config);
    }

    /// Re-derive the cached visual (mode switch, config change)
    pub fn refresh(&mut self, mode: Mode, config: &GridConfig) {
        self.visual = derive_visual(&self.step, mode, self.slot, config);
    }

    /// Event routing is by containment only
    pub fn contains(&self, point: Point) -> bool {
        self.slot.contains(point)
    }
}

/// Derive a cell's visual from its step and the active mode.
///
/// Pure: same inputs, identical output.
pub fn derive_visual(step: &Step, mode: Mode, slot: Rectangle, config: &GridConfig) -> CellVisual {
    let pad = config.cell_padding;
    let inner = Rectangle {
        x: slot.x + pad,
        y: slot.y + pad,
        width: (slot.width - 2.0 * pad).max(0.0),
        height: (slot.height - 2.0 * pad).max(0.0),
    };

    let (value_rect, mut value_fill, label) = match mode {
        Mode::Velocity => {
            let frac = step.velocity as f32 / VELOCITY_MAX as f32;
            let height = inner.height * frac;
            let rect = Rectangle {
                x: inner.x,
                y: inner.y + inner.height - height,
                width: inner.width,
                height,
            };
            let fill = Color {
                a: 0.35 + 0.65 * frac,
                ..theme::STEP_VALUE
            };
            (rect, fill, step.velocity.to_string())
        }
        Mode::Pitch => {
            let frac = step.pitch as f32 / PITCH_MAX as f32;
            let travel = (inner.height - PITCH_BAR_HEIGHT).max(0.0);
            let rect = Rectangle {
                x: inner.x,
                y: inner.y + (1.0 - frac) * travel,
                width: inner.width,
                height: PITCH_BAR_HEIGHT,
            };
            (rect, theme::STEP_VALUE, pitch_name(step.pitch))
        }
        Mode::Duration => {
            let frac = step.duration / DURATION_MAX;
            let rect = Rectangle {
                x: inner.x,
                y: inner.y,
                width: inner.width * frac,
                height: inner.height,
            };
            let fill = Color {
                a: 0.6,
                ..theme::STEP_VALUE
            };
            (rect, fill, format!("{:.0}%", step.duration * 100.0))
        }
        Mode::Octave => {
            let span = (OCTAVE_MAX - OCTAVE_MIN) as f32;
            let frac = (step.octave - OCTAVE_MIN) as f32 / span;
            let travel = (inner.height - OCTAVE_MARKER_SIZE).max(0.0);
            let rect = Rectangle {
                x: inner.x + (inner.width - OCTAVE_MARKER_SIZE) / 2.0,
                y: inner.y + (1.0 - frac) * travel,
                width: OCTAVE_MARKER_SIZE,
                height: OCTAVE_MARKER_SIZE,
            };
            let label = if step.octave == 0 {
                "0".to_string()
            } else {
                format!("{:+}", step.octave)
            };
            (rect, theme::STEP_VALUE, label)
        }
        Mode::Group => {
            let rect = inner;
            let fill = Color {
                a: 0.8,
                ..config.group_color(step.group)
            };
            (rect, fill, format!("G{}", step.group + 1))
        }
    };

    let mut label_color = theme::LABEL;
    if !step.enabled {
        value_fill = theme::ghosted(value_fill, theme::DISABLED_ALPHA);
        label_color = theme::ghosted(label_color, theme::DISABLED_ALPHA);
    }

    CellVisual {
        slot_fill: theme::CELL_SLOT,
        value_rect,
        value_fill,
        label,
        label_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> Rectangle {
        Rectangle {
            x: 10.0,
            y: 26.0,
            width: 56.0,
            height: 120.0,
        }
    }

    fn step() -> Step {
        Step {
            enabled: true,
            ..Step::default()
        }
    }

    #[test]
    fn visual_is_pure() {
        let config = GridConfig::default();
        for mode in Mode::ALL {
            let a = derive_visual(&step(), mode, slot(), &config);
            let b = derive_visual(&step(), mode, slot(), &config);
            assert_eq!(a, b, "re-deriving under {:?} must be bit-identical", mode);
        }
    }

    #[test]
    fn pitch_names() {
        assert_eq!(pitch_name(60), "C4");
        assert_eq!(pitch_name(61), "C#4");
        assert_eq!(pitch_name(58), "A#3");
        assert_eq!(pitch_name(0), "C-1");
        assert_eq!(pitch_name(127), "G9");
    }

    #[test]
    fn velocity_bar_scales_with_value() {
        let config = GridConfig::default();
        let mut s = step();

        s.velocity = 127;
        let full = derive_visual(&s, Mode::Velocity, slot(), &config);
        let inner_height = slot().height - 2.0 * config.cell_padding;
        assert!((full.value_rect.height - inner_height).abs() < 0.01);
        assert_eq!(full.label, "127");

        s.velocity = 0;
        let empty = derive_visual(&s, Mode::Velocity, slot(), &config);
        assert_eq!(empty.value_rect.height, 0.0);
    }

    #[test]
    fn duration_bar_scales_with_fraction() {
        let config = GridConfig::default();
        let mut s = step();
        s.duration = 0.5;
        let v = derive_visual(&s, Mode::Duration, slot(), &config);
        let inner_width = slot().width - 2.0 * config.cell_padding;
        assert!((v.value_rect.width - inner_width * 0.5).abs() < 0.01);
        assert_eq!(v.label, "50%");
    }

    #[test]
    fn pitch_bar_rises_with_pitch() {
        let config = GridConfig::default();
        let mut s = step();
        s.pitch = 0;
        let low = derive_visual(&s, Mode::Pitch, slot(), &config);
        s.pitch = 127;
        let high = derive_visual(&s, Mode::Pitch, slot(), &config);
        assert!(high.value_rect.y < low.value_rect.y);
    }

    #[test]
    fn group_fill_is_stable_per_group() {
        let config = GridConfig::default();
        let mut a = step();
        a.group = 3;
        let mut b = step();
        b.group = 3;
        b.pitch = 90; // unrelated parameter must not shift the group color
        let va = derive_visual(&a, Mode::Group, slot(), &config);
        let vb = derive_visual(&b, Mode::Group, slot(), &config);
        assert_eq!(va.value_fill, vb.value_fill);
        assert_eq!(va.label, "G4");
    }

    #[test]
    fn disabled_steps_render_ghosted() {
        let config = GridConfig::default();
        let mut s = step();
        let lit = derive_visual(&s, Mode::Velocity, slot(), &config);
        s.enabled = false;
        let ghost = derive_visual(&s, Mode::Velocity, slot(), &config);
        assert!(ghost.value_fill.a < lit.value_fill.a);
        // Geometry is unchanged; only the styling fades
        assert_eq!(ghost.value_rect, lit.value_rect);
    }

    #[test]
    fn cell_hit_testing_is_containment_only() {
        let config = GridConfig::default();
        let cell = StepCell::new(0, step(), slot(), Mode::Velocity, &config);
        assert!(cell.contains(Point::new(12.0, 30.0)));
        assert!(!cell.contains(Point::new(5.0, 30.0)));
        assert!(!cell.contains(Point::new(12.0, 400.0)));
    }
}
