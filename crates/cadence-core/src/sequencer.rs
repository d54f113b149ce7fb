//! StepSequencer - the live pattern model the grid editor binds to
//!
//! The sequencer owns the pattern (steps + tempo) behind a mutex, publishes
//! a change-notification feed over crossbeam channels, and exposes the
//! playhead as a lock-free atomic so the UI can poll it every tick without
//! touching the pattern lock.
//!
//! Every write goes through one of the explicit per-parameter methods here;
//! each fires exactly one notification. A notification is fired even when
//! clamping left the value unchanged, so the view still gets its render
//! pass. Out-of-range step indices are ignored silently: a gesture racing a
//! topology change is abandoned, and the rebuild triggered by the topology
//! notification is authoritative.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crossbeam::channel::{self, Receiver, Sender};
use thiserror::Error;

use crate::region::PatternRegion;
use crate::step::Step;

/// Playhead sentinel meaning "not playing"
pub(crate) const PLAYHEAD_NONE: usize = usize::MAX;

/// Upper bound on the pattern length
pub const MAX_STEPS: usize = 64;

/// Step count of a freshly created sequencer
pub const DEFAULT_STEP_COUNT: usize = 16;

/// Grid resolution: sixteenth notes
pub const STEPS_PER_BEAT: u32 = 4;

/// Tempo bounds (BPM)
pub const TEMPO_MIN: f64 = 20.0;
pub const TEMPO_MAX: f64 = 300.0;

/// A change published on the notification feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerChange {
    /// One step's parameters changed
    Step(usize),
    /// Step count, tempo, or transport state changed
    Sequencer,
}

/// Errors from pattern-level operations
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern length must be 1..={MAX_STEPS} steps, got {0}")]
    StepCount(usize),
}

/// Pattern state guarded by the sequencer's mutex
struct Pattern {
    steps: Vec<Step>,
    tempo_bpm: f64,
}

/// The live sequencer model
///
/// Intended to be shared as `Arc<StepSequencer>`: the UI holds one clone,
/// the transport clock thread holds a `Weak` so it dies with the model.
pub struct StepSequencer {
    pattern: Mutex<Pattern>,
    /// Current playhead step, or PLAYHEAD_NONE while stopped
    pub(crate) playhead: AtomicUsize,
    pub(crate) running: AtomicBool,
    subscribers: Mutex<Vec<Sender<SequencerChange>>>,
}

impl StepSequencer {
    /// Create a sequencer with `step_count` default steps
    pub fn new(step_count: usize, tempo_bpm: f64) -> Result<Self, PatternError> {
        if step_count == 0 || step_count > MAX_STEPS {
            return Err(PatternError::StepCount(step_count));
        }
        Ok(Self {
            pattern: Mutex::new(Pattern {
                steps: vec![Step::default(); step_count],
                tempo_bpm: tempo_bpm.clamp(TEMPO_MIN, TEMPO_MAX),
            }),
            playhead: AtomicUsize::new(PLAYHEAD_NONE),
            running: AtomicBool::new(false),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    // ------------------------------------------------------------------
    // Notification feed
    // ------------------------------------------------------------------

    /// Subscribe to the change feed. Dropping the receiver unsubscribes;
    /// the dead sender is pruned on the next notification.
    pub fn subscribe(&self) -> Receiver<SequencerChange> {
        let (tx, rx) = channel::unbounded();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    pub(crate) fn notify(&self, change: SequencerChange) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(change).is_ok());
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn step_count(&self) -> usize {
        self.pattern.lock().map(|p| p.steps.len()).unwrap_or(0)
    }

    /// Copy of one step, or None if the index is out of range
    pub fn step(&self, index: usize) -> Option<Step> {
        self.pattern
            .lock()
            .ok()
            .and_then(|p| p.steps.get(index).copied())
    }

    /// Copy of the whole pattern
    pub fn snapshot(&self) -> Vec<Step> {
        self.pattern
            .lock()
            .map(|p| p.steps.clone())
            .unwrap_or_default()
    }

    pub fn tempo(&self) -> f64 {
        self.pattern
            .lock()
            .map(|p| p.tempo_bpm)
            .unwrap_or(TEMPO_MIN)
    }

    /// Current playhead step, or None while stopped (lock-free)
    #[inline]
    pub fn playhead(&self) -> Option<usize> {
        match self.playhead.load(Ordering::Relaxed) {
            PLAYHEAD_NONE => None,
            step => Some(step),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    // ------------------------------------------------------------------
    // Per-step writes (one notification each, clamped, never failing)
    // ------------------------------------------------------------------

    pub fn adjust_pitch(&self, index: usize, amt: i32) {
        self.with_step(index, |s| s.adjust_pitch(amt));
    }

    pub fn adjust_velocity(&self, index: usize, amt: i32) {
        self.with_step(index, |s| s.adjust_velocity(amt));
    }

    pub fn adjust_duration(&self, index: usize, amt: f32) {
        self.with_step(index, |s| s.adjust_duration(amt));
    }

    pub fn adjust_octave(&self, index: usize, amt: i32) {
        self.with_step(index, |s| s.adjust_octave(amt));
    }

    pub fn adjust_group(&self, index: usize, amt: i32) {
        self.with_step(index, |s| s.adjust_group(amt));
    }

    pub fn toggle_step(&self, index: usize) {
        self.with_step(index, |s| s.toggle());
    }

    /// Run `edit` on one step and fire a step-scoped notification.
    /// A missing index means the gesture raced a topology change; ignore it.
    fn with_step(&self, index: usize, edit: impl FnOnce(&mut Step) -> bool) {
        let hit = match self.pattern.lock() {
            Ok(mut pattern) => match pattern.steps.get_mut(index) {
                Some(step) => {
                    edit(step);
                    true
                }
                None => false,
            },
            Err(_) => false,
        };
        if hit {
            self.notify(SequencerChange::Step(index));
        }
    }

    // ------------------------------------------------------------------
    // Sequencer-level writes
    // ------------------------------------------------------------------

    /// Grow or shrink the pattern. Added steps are defaults; removed steps
    /// are dropped from the tail. Fires a topology notification.
    pub fn set_step_count(&self, count: usize) -> Result<(), PatternError> {
        if count == 0 || count > MAX_STEPS {
            return Err(PatternError::StepCount(count));
        }
        if let Ok(mut pattern) = self.pattern.lock() {
            if pattern.steps.len() == count {
                return Ok(());
            }
            pattern.steps.resize(count, Step::default());
            // Keep a running playhead inside the new pattern
            let ph = self.playhead.load(Ordering::Relaxed);
            if ph != PLAYHEAD_NONE && ph >= count {
                self.playhead.store(ph % count, Ordering::Relaxed);
            }
        }
        self.notify(SequencerChange::Sequencer);
        Ok(())
    }

    pub fn set_tempo(&self, tempo_bpm: f64) {
        if let Ok(mut pattern) = self.pattern.lock() {
            pattern.tempo_bpm = tempo_bpm.clamp(TEMPO_MIN, TEMPO_MAX);
        }
        self.notify(SequencerChange::Sequencer);
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Materialize the current pattern as a reusable region snapshot
    pub fn export_region(&self, name: &str) -> PatternRegion {
        let (steps, tempo_bpm) = match self.pattern.lock() {
            Ok(p) => (p.steps.clone(), p.tempo_bpm),
            Err(_) => (Vec::new(), TEMPO_MIN),
        };
        PatternRegion {
            name: name.to_string(),
            tempo_bpm,
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::VELOCITY_MAX;

    #[test]
    fn adjust_fires_step_scoped_notification() {
        let seq = StepSequencer::new(8, 120.0).unwrap();
        let rx = seq.subscribe();

        seq.adjust_pitch(3, -2);
        assert_eq!(rx.try_recv().unwrap(), SequencerChange::Step(3));
        assert_eq!(seq.step(3).unwrap().pitch, 58);
    }

    #[test]
    fn at_max_adjust_still_notifies_but_stays_put() {
        let seq = StepSequencer::new(4, 120.0).unwrap();
        seq.adjust_velocity(0, 1000);
        assert_eq!(seq.step(0).unwrap().velocity, VELOCITY_MAX);

        let rx = seq.subscribe();
        seq.adjust_velocity(0, 1);
        // The value pins at the bound but the view still gets its render pass
        assert_eq!(rx.try_recv().unwrap(), SequencerChange::Step(0));
        assert_eq!(seq.step(0).unwrap().velocity, VELOCITY_MAX);
    }

    #[test]
    fn stale_index_is_ignored() {
        let seq = StepSequencer::new(4, 120.0).unwrap();
        let rx = seq.subscribe();
        seq.adjust_pitch(99, 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn topology_change_notifies_and_resizes() {
        let seq = StepSequencer::new(16, 120.0).unwrap();
        let rx = seq.subscribe();

        seq.set_step_count(24).unwrap();
        assert_eq!(rx.try_recv().unwrap(), SequencerChange::Sequencer);
        assert_eq!(seq.step_count(), 24);

        seq.set_step_count(8).unwrap();
        assert_eq!(seq.step_count(), 8);

        assert!(seq.set_step_count(0).is_err());
        assert!(seq.set_step_count(MAX_STEPS + 1).is_err());
    }

    #[test]
    fn dropped_receiver_unsubscribes_cleanly() {
        let seq = StepSequencer::new(4, 120.0).unwrap();
        let rx = seq.subscribe();
        drop(rx);
        // Pruned on the next notification; nothing panics, nothing leaks
        seq.adjust_pitch(0, 1);
        let rx2 = seq.subscribe();
        seq.adjust_pitch(0, 1);
        assert_eq!(rx2.try_recv().unwrap(), SequencerChange::Step(0));
    }

    #[test]
    fn export_snapshots_the_live_pattern() {
        let seq = StepSequencer::new(4, 132.0).unwrap();
        seq.adjust_pitch(1, 5);
        seq.toggle_step(2);

        let region = seq.export_region("take 1");
        assert_eq!(region.name, "take 1");
        assert_eq!(region.tempo_bpm, 132.0);
        assert_eq!(region.steps.len(), 4);
        assert_eq!(region.steps[1].pitch, 65);
        assert!(region.steps[2].enabled);

        // Later edits do not bleed into the snapshot
        seq.adjust_pitch(1, 5);
        assert_eq!(region.steps[1].pitch, 65);
    }
}
