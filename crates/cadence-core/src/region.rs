//! Pattern region - a materialized snapshot of the current pattern
//!
//! Export-as-region hands the surrounding application a frozen copy of the
//! pattern it can drop onto a timeline or stash in a library. The snapshot
//! is independent of the live sequencer; later edits do not affect it.

use serde::{Deserialize, Serialize};

use crate::sequencer::STEPS_PER_BEAT;
use crate::step::Step;

/// A frozen copy of a pattern, detached from the live sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRegion {
    /// Display name given at export time
    pub name: String,
    /// Tempo the pattern was authored at
    pub tempo_bpm: f64,
    /// The steps, in pattern order
    pub steps: Vec<Step>,
}

impl PatternRegion {
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Musical length of the region in beats
    pub fn length_beats(&self) -> f64 {
        self.steps.len() as f64 / STEPS_PER_BEAT as f64
    }

    /// Number of steps that actually sound
    pub fn active_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.enabled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_and_active_counts() {
        let mut steps = vec![Step::default(); 16];
        steps[0].enabled = true;
        steps[4].enabled = true;

        let region = PatternRegion {
            name: "loop A".to_string(),
            tempo_bpm: 128.0,
            steps,
        };
        assert_eq!(region.step_count(), 16);
        assert_eq!(region.length_beats(), 4.0);
        assert_eq!(region.active_steps(), 2);
    }
}
