//! Transport clock - advances the playhead while playing
//!
//! Timing only: the clock thread steps the playhead atomic at the pattern's
//! tempo and never touches audio. The thread holds a `Weak` reference to the
//! sequencer, so dropping the model (or calling `stop`) shuts it down.

use std::sync::atomic::Ordering;
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use crate::sequencer::{SequencerChange, StepSequencer, PLAYHEAD_NONE, STEPS_PER_BEAT};

/// How often the clock thread wakes to check for stop/tempo changes
const CLOCK_RESOLUTION: Duration = Duration::from_millis(5);

impl StepSequencer {
    /// Start playback from step 0. No-op if already playing.
    pub fn play(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        self.playhead.store(0, Ordering::Relaxed);
        self.notify(SequencerChange::Sequencer);

        let weak = Arc::downgrade(self);
        let spawned = thread::Builder::new()
            .name("cadence-transport".to_string())
            .spawn(move || run_clock(weak));
        if let Err(e) = spawned {
            log::error!("transport: failed to spawn clock thread: {}", e);
            self.running.store(false, Ordering::SeqCst);
            self.playhead.store(PLAYHEAD_NONE, Ordering::Relaxed);
        }
    }

    /// Stop playback and park the playhead. No-op if already stopped.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.playhead.store(PLAYHEAD_NONE, Ordering::Relaxed);
        self.notify(SequencerChange::Sequencer);
    }

    /// Wall-clock length of one step at the current tempo
    fn step_interval(&self) -> Duration {
        let beats_per_second = self.tempo() / 60.0;
        Duration::from_secs_f64(1.0 / (beats_per_second * STEPS_PER_BEAT as f64))
    }

    /// Move the playhead to the next step, wrapping at the pattern length
    pub(crate) fn advance_playhead(&self) {
        let len = self.step_count();
        if len == 0 {
            return;
        }
        let ph = self.playhead.load(Ordering::Relaxed);
        let next = if ph == PLAYHEAD_NONE { 0 } else { (ph + 1) % len };
        self.playhead.store(next, Ordering::Relaxed);
    }
}

fn run_clock(seq: Weak<StepSequencer>) {
    let mut next_advance = match seq.upgrade() {
        Some(seq) => Instant::now() + seq.step_interval(),
        None => return,
    };

    loop {
        thread::sleep(CLOCK_RESOLUTION);

        let Some(seq) = seq.upgrade() else {
            return;
        };
        if !seq.is_running() {
            return;
        }
        // Re-read the interval every pass so live tempo edits take effect
        while Instant::now() >= next_advance {
            seq.advance_playhead();
            next_advance += seq.step_interval();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::StepSequencer;

    #[test]
    fn play_and_stop_drive_the_playhead_sentinel() {
        let seq = Arc::new(StepSequencer::new(4, 120.0).unwrap());
        assert_eq!(seq.playhead(), None);

        seq.play();
        assert!(seq.is_running());
        assert_eq!(seq.playhead(), Some(0));

        seq.stop();
        assert!(!seq.is_running());
        assert_eq!(seq.playhead(), None);
    }

    #[test]
    fn playhead_wraps_at_pattern_length() {
        let seq = Arc::new(StepSequencer::new(2, 120.0).unwrap());
        seq.play();
        seq.advance_playhead();
        assert_eq!(seq.playhead(), Some(1));
        seq.advance_playhead();
        assert_eq!(seq.playhead(), Some(0));
        seq.stop();
    }

    #[test]
    fn play_twice_is_a_no_op() {
        let seq = Arc::new(StepSequencer::new(4, 120.0).unwrap());
        seq.play();
        seq.advance_playhead();
        seq.play(); // must not rewind a running transport
        assert_eq!(seq.playhead(), Some(1));
        seq.stop();
    }
}
