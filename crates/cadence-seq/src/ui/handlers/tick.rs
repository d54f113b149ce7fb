//! Tick message handler
//!
//! The playback-position poll: reads the sequencer's playhead atomic and
//! moves the grid's highlighted column. This is the only polling-based
//! refresh in the editor; every other repaint is notification-driven. The
//! subscription gates the tick on the window being mapped, so a hidden
//! editor does no work here.

use iced::Task;

use crate::ui::app::SeqApp;
use crate::ui::message::Message;

/// Handle the tick message (runs ~30fps while mapped)
pub fn handle(app: &mut SeqApp) -> Task<Message> {
    app.grid.set_playhead(app.sequencer.playhead());
    Task::none()
}
