//! Grid edit handler
//!
//! Applies gesture edits published by the grid canvas to the sequencer.
//! The model clamps out-of-range values and ignores stale indices; the
//! grid repaints when the resulting change notification comes back, so
//! nothing is refreshed here.

use iced::Task;

use cadence_widgets::GridMessage;

use crate::ui::app::SeqApp;
use crate::ui::message::Message;

pub fn handle(app: &mut SeqApp, edit: GridMessage) -> Task<Message> {
    let seq = &app.sequencer;
    match edit {
        GridMessage::AdjustPitch(index, amt) => seq.adjust_pitch(index, amt),
        GridMessage::AdjustVelocity(index, amt) => seq.adjust_velocity(index, amt),
        GridMessage::AdjustDuration(index, amt) => seq.adjust_duration(index, amt),
        GridMessage::AdjustOctave(index, amt) => seq.adjust_octave(index, amt),
        GridMessage::AdjustGroup(index, amt) => seq.adjust_group(index, amt),
        GridMessage::ToggleStep(index) => seq.toggle_step(index),
    }
    Task::none()
}
