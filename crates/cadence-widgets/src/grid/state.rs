//! Grid state - the cell/indicator collections and the active mode
//!
//! Pure data, recomputed from model notifications and drawn every frame by
//! the canvas program. Invariants maintained here:
//!
//! - exactly one cell per live step (collections rebuilt wholesale on a
//!   topology change, stale cells discarded)
//! - the mode is grid-global; switching re-derives every cell's visual and
//!   never mutates step data
//! - a cell's cached visual is re-derived on its step's change
//!   notification or on a mode change, never left stale

use iced::{Point, Rectangle, Size};

use cadence_core::Step;

use super::{GridConfig, Mode, StepCell, StepIndicator};

/// Visual state for one step grid
#[derive(Debug, Clone)]
pub struct GridState {
    mode: Mode,
    cells: Vec<StepCell>,
    indicators: Vec<StepIndicator>,
    /// Column highlighted by the playback poll, None while stopped
    playhead_step: Option<usize>,
}

impl GridState {
    pub fn new(steps: &[Step], config: &GridConfig) -> Self {
        let mut state = Self {
            mode: Mode::Velocity,
            cells: Vec::new(),
            indicators: Vec::new(),
            playhead_step: None,
        };
        state.rebuild(steps, config);
        state
    }

    // ------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch the active mode. No-op if unchanged; otherwise every cell
    /// re-derives its visual. Step data is never touched.
    pub fn set_mode(&mut self, mode: Mode, config: &GridConfig) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        for cell in &mut self.cells {
            cell.refresh(mode, config);
        }
        true
    }

    // ------------------------------------------------------------------
    // Synchronization with the model
    // ------------------------------------------------------------------

    /// Rebuild both collections from a fresh pattern snapshot. The
    /// authoritative answer to a topology change: stale cells are gone,
    /// counts match the model again.
    pub fn rebuild(&mut self, steps: &[Step], config: &GridConfig) {
        self.cells = steps
            .iter()
            .enumerate()
            .map(|(i, step)| StepCell::new(i, *step, cell_slot(i, config), self.mode, config))
            .collect();
        self.indicators = steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                StepIndicator::new(i, indicator_slot(i, config), config.group_color(step.group))
            })
            .collect();
        if let Some(ph) = self.playhead_step {
            if ph >= self.cells.len() {
                self.playhead_step = None;
            }
        }
    }

    /// Refresh one cell from its step's new value (step-scoped change
    /// notification). Unknown indices are ignored; the topology rebuild
    /// handles those.
    pub fn refresh_step(&mut self, index: usize, step: Step, config: &GridConfig) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.set_step(step, self.mode, config);
        }
        if let Some(ind) = self.indicators.get_mut(index) {
            ind.tint = config.group_color(step.group);
        }
    }

    /// Update the highlighted playback column. Returns true if it moved.
    pub fn set_playhead(&mut self, step: Option<usize>) -> bool {
        let clamped = step.filter(|&s| s < self.cells.len());
        if self.playhead_step == clamped {
            return false;
        }
        self.playhead_step = clamped;
        true
    }

    // ------------------------------------------------------------------
    // Reads for the canvas program and the host
    // ------------------------------------------------------------------

    pub fn cells(&self) -> &[StepCell] {
        &self.cells
    }

    pub fn indicators(&self) -> &[StepIndicator] {
        &self.indicators
    }

    pub fn playhead_step(&self) -> Option<usize> {
        self.playhead_step
    }

    /// Index of the cell containing `point`, if any
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        self.cells.iter().find(|c| c.contains(point)).map(|c| c.index)
    }

    /// Rendered content size, for layout negotiation with the host
    pub fn content_size(&self, config: &GridConfig) -> Size {
        Size::new(
            self.cells.len() as f32 * config.step_width,
            config.header_height + config.row_height,
        )
    }
}

/// Slot rectangle for step `index`
fn cell_slot(index: usize, config: &GridConfig) -> Rectangle {
    Rectangle {
        x: index as f32 * config.step_width,
        y: config.header_height,
        width: config.step_width,
        height: config.row_height,
    }
}

/// Header slot above step `index`
fn indicator_slot(index: usize, config: &GridConfig) -> Rectangle {
    Rectangle {
        x: index as f32 * config.step_width,
        y: 0.0,
        width: config.step_width,
        height: config.header_height,
    }
}
