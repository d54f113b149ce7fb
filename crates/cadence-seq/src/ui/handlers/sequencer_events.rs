//! Sequencer change-notification handler
//!
//! Routes the two notification payloads: a step-scoped change refreshes
//! exactly that cell from a fresh model read; a sequencer-scoped change
//! rebuilds the cell collections when the topology moved. The rebuild is
//! authoritative — stale cells (and any gesture targeting them) are gone
//! afterwards.

use iced::Task;

use cadence_core::SequencerChange;

use crate::ui::app::SeqApp;
use crate::ui::message::Message;

pub fn handle(app: &mut SeqApp, change: SequencerChange) -> Task<Message> {
    match change {
        SequencerChange::Step(index) => {
            match app.sequencer.step(index) {
                Some(step) => app.grid.refresh_step(index, step, &app.grid_config),
                // The step vanished between the notification and this read;
                // the topology notification that follows will rebuild
                None => log::debug!("step {} changed but no longer exists", index),
            }
        }
        SequencerChange::Sequencer => {
            if app.sequencer.step_count() != app.grid.cells().len() {
                app.grid.rebuild(&app.sequencer.snapshot(), &app.grid_config);
            }
            // Transport/tempo changes need no structural work; the playback
            // poll and the transport row read the model directly
        }
    }
    Task::none()
}
