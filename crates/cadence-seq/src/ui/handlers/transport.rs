//! Transport and editor command handlers
//!
//! Play/stop, export-as-region, mode selection, pattern length, and the
//! map/unmap flag. These are commands the editor issues to the model (or
//! to its own view state); none of them touch cell visuals directly.

use iced::Task;

use cadence_widgets::Mode;

use crate::ui::app::SeqApp;
use crate::ui::message::Message;

pub fn toggle_play(app: &mut SeqApp) -> Task<Message> {
    if app.sequencer.is_running() {
        app.sequencer.stop();
    } else {
        app.sequencer.play();
    }
    Task::none()
}

pub fn export_region(app: &mut SeqApp) -> Task<Message> {
    let region = app.sequencer.export_region("pattern");
    app.status = format!(
        "Exported '{}': {} steps ({} active), {:.1} beats at {:.0} BPM",
        region.name,
        region.step_count(),
        region.active_steps(),
        region.length_beats(),
        region.tempo_bpm,
    );
    log::info!("{}", app.status);
    app.last_export = Some(region);
    Task::none()
}

/// Mode switching re-derives every cell visual; it never touches step data
pub fn set_mode(app: &mut SeqApp, mode: Mode) -> Task<Message> {
    app.grid.set_mode(mode, &app.grid_config);
    Task::none()
}

pub fn add_step(app: &mut SeqApp) -> Task<Message> {
    let count = app.sequencer.step_count() + 1;
    if let Err(e) = app.sequencer.set_step_count(count) {
        log::warn!("cannot grow pattern: {}", e);
    }
    Task::none()
}

pub fn remove_step(app: &mut SeqApp) -> Task<Message> {
    let count = app.sequencer.step_count();
    if count <= 1 {
        return Task::none();
    }
    if let Err(e) = app.sequencer.set_step_count(count - 1) {
        log::warn!("cannot shrink pattern: {}", e);
    }
    Task::none()
}

/// Window map state drives the playback poll; unmapped editors do no
/// timer work
pub fn set_mapped(app: &mut SeqApp, mapped: bool) -> Task<Message> {
    app.mapped = mapped;
    Task::none()
}
