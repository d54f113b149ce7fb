//! Main iced application for the cadence step sequencer editor
//!
//! Binds one sequencer instance to one grid: applies gesture edits to the
//! model, routes change notifications back into grid refreshes, and polls
//! the playback position on a timer while the window is mapped. Everything
//! except the playback poll is notification-driven.

use std::sync::Arc;
use std::time::Duration;

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{time, Center, Element, Fill, Subscription, Task, Theme};

use crossbeam::channel::Receiver;

use cadence_core::{PatternRegion, SequencerChange, StepSequencer};
use cadence_widgets::{
    button_styles, change_subscription, step_grid, GridConfig, GridState, Mode,
};

use super::handlers;
use super::message::Message;
use crate::config::SeqConfig;

/// Playback poll interval (~30fps, matches the grid's animation needs)
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Application state
pub struct SeqApp {
    /// The live model; the app holds one strong reference for its lifetime
    pub(crate) sequencer: Arc<StepSequencer>,
    /// Subscribed change feed, bridged into the iced subscription
    pub(crate) changes: Arc<Receiver<SequencerChange>>,
    /// Grid visual state
    pub(crate) grid: GridState,
    /// Injected grid tuning
    pub(crate) grid_config: GridConfig,
    /// Whether the window is mapped; gates the playback poll
    pub(crate) mapped: bool,
    /// Last exported pattern region
    pub(crate) last_export: Option<PatternRegion>,
    /// Status line under the transport row
    pub(crate) status: String,
}

impl SeqApp {
    /// Create a new application instance bound to one sequencer
    pub fn new(sequencer: Arc<StepSequencer>, config: &SeqConfig) -> Self {
        let changes = Arc::new(sequencer.subscribe());
        let grid_config = config.display.grid_config();
        let grid = GridState::new(&sequencer.snapshot(), &grid_config);
        Self {
            sequencer,
            changes,
            grid,
            grid_config,
            mapped: true,
            last_export: None,
            status: String::new(),
        }
    }

    /// Update application state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => handlers::tick::handle(self),
            Message::SequencerChanged(change) => handlers::sequencer_events::handle(self, change),
            Message::Grid(edit) => handlers::grid::handle(self, edit),
            Message::SetMode(mode) => handlers::transport::set_mode(self, mode),
            Message::TogglePlay => handlers::transport::toggle_play(self),
            Message::ExportRegion => handlers::transport::export_region(self),
            Message::AddStep => handlers::transport::add_step(self),
            Message::RemoveStep => handlers::transport::remove_step(self),
            Message::Focused(mapped) => handlers::transport::set_mapped(self, mapped),
        }
    }

    /// Subscribe to the change feed, window events, and (while mapped)
    /// the playback poll
    pub fn subscription(&self) -> Subscription<Message> {
        let mut subs = vec![
            change_subscription(self.changes.clone()).map(Message::SequencerChanged),
            iced::event::listen_with(|event, _status, _window| match event {
                iced::Event::Window(iced::window::Event::Focused) => Some(Message::Focused(true)),
                iced::Event::Window(iced::window::Event::Unfocused) => {
                    Some(Message::Focused(false))
                }
                _ => None,
            }),
        ];
        if self.mapped {
            subs.push(time::every(TICK_INTERVAL).map(|_| Message::Tick));
        }
        Subscription::batch(subs)
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let mode_row = self.view_mode_selector();
        let transport_row = self.view_transport();

        // The grid takes its natural width; scroll when the pattern
        // outgrows the window
        let grid = scrollable(
            container(step_grid(&self.grid, &self.grid_config, Message::Grid)).padding(4),
        )
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new(),
        ))
        .width(Fill);

        let status = text(&self.status).size(12);

        let content = column![mode_row, transport_row, grid, status]
            .spacing(8)
            .padding(10);

        container(content).width(Fill).into()
    }

    fn view_mode_selector(&self) -> Element<'_, Message> {
        let buttons = Mode::ALL.iter().map(|&mode| {
            let active = self.grid.mode() == mode;
            button(text(mode.label()).size(12))
                .padding([4, 10])
                .style(move |_theme, status| button_styles::toggle_style(status, active))
                .on_press(Message::SetMode(mode))
                .into()
        });
        row(buttons).spacing(4).into()
    }

    fn view_transport(&self) -> Element<'_, Message> {
        let playing = self.sequencer.is_running();
        let play_label = if playing { "⏹ Stop" } else { "▶ Play" };
        let play_btn = button(text(play_label).size(14))
            .padding([4, 12])
            .style(|_theme, status| {
                button_styles::press_release_style(status, button_styles::ACTIVE_BG)
            })
            .on_press(Message::TogglePlay);

        let export_btn = button(text("Export Region").size(12))
            .padding([4, 10])
            .style(|_theme, status| {
                button_styles::press_release_style(status, button_styles::DEFAULT_BG)
            })
            .on_press(Message::ExportRegion);

        let remove_btn = button(text("−").size(14))
            .padding([4, 10])
            .style(|_theme, status| {
                button_styles::press_release_style(status, button_styles::DEFAULT_BG)
            })
            .on_press(Message::RemoveStep);
        let add_btn = button(text("+").size(14))
            .padding([4, 10])
            .style(|_theme, status| {
                button_styles::press_release_style(status, button_styles::DEFAULT_BG)
            })
            .on_press(Message::AddStep);

        let steps_label = text(format!("{} steps", self.sequencer.step_count())).size(12);
        let tempo_label = text(format!("{:.0} BPM", self.sequencer.tempo())).size(12);

        row![
            play_btn,
            export_btn,
            Space::new().width(Fill),
            remove_btn,
            steps_label,
            add_btn,
            Space::new().width(16.0),
            tempo_label,
        ]
        .spacing(6)
        .align_y(Center)
        .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Step;
    use cadence_widgets::GridMessage;

    fn app() -> SeqApp {
        let sequencer = Arc::new(StepSequencer::new(16, 120.0).unwrap());
        SeqApp::new(sequencer, &SeqConfig::default())
    }

    /// Deliver every pending change notification, as the subscription
    /// bridge would
    fn pump(app: &mut SeqApp) {
        let pending: Vec<SequencerChange> = app.changes.try_iter().collect();
        for change in pending {
            let _ = app.update(Message::SequencerChanged(change));
        }
    }

    #[test]
    fn gesture_edit_flows_model_first() {
        let mut app = app();
        let _ = app.update(Message::SetMode(Mode::Pitch));

        // The edit lands in the model immediately...
        let _ = app.update(Message::Grid(GridMessage::AdjustPitch(0, -2)));
        assert_eq!(app.sequencer.step(0).unwrap().pitch, 58);
        // ...and the cell label follows once the notification arrives
        pump(&mut app);
        assert_eq!(app.grid.cells()[0].visual.label, "A#3");
    }

    #[test]
    fn at_max_edit_changes_nothing_but_still_renders() {
        let mut app = app();
        let _ = app.update(Message::Grid(GridMessage::AdjustVelocity(2, 1000)));
        pump(&mut app);
        assert_eq!(app.sequencer.step(2).unwrap().velocity, 127);
        assert_eq!(app.grid.cells()[2].visual.label, "127");

        // One more increase: value pinned, refresh still happens cleanly
        let _ = app.update(Message::Grid(GridMessage::AdjustVelocity(2, 1)));
        pump(&mut app);
        assert_eq!(app.grid.cells()[2].visual.label, "127");
    }

    #[test]
    fn mode_round_trip_mutates_no_step() {
        let mut app = app();
        let before = app.sequencer.snapshot();
        let _ = app.update(Message::SetMode(Mode::Group));
        let _ = app.update(Message::SetMode(Mode::Velocity));
        assert_eq!(app.sequencer.snapshot(), before);
    }

    #[test]
    fn topology_change_rebuilds_the_grid() {
        let mut app = app();
        let _ = app.update(Message::AddStep);
        pump(&mut app);
        assert_eq!(app.grid.cells().len(), 17);

        for _ in 0..5 {
            let _ = app.update(Message::RemoveStep);
        }
        pump(&mut app);
        assert_eq!(app.grid.cells().len(), 12);
        assert_eq!(app.grid.cells().len(), app.sequencer.step_count());
    }

    #[test]
    fn click_toggle_arms_a_step() {
        let mut app = app();
        assert!(!app.sequencer.step(5).unwrap().enabled);
        let _ = app.update(Message::Grid(GridMessage::ToggleStep(5)));
        pump(&mut app);
        assert!(app.sequencer.step(5).unwrap().enabled);
        assert!(app.grid.cells()[5].step.enabled);
    }

    #[test]
    fn stale_edit_after_shrink_is_ignored() {
        let mut app = app();
        let before: Vec<Step> = app.sequencer.snapshot();
        let _ = app.update(Message::Grid(GridMessage::AdjustPitch(99, 1)));
        pump(&mut app);
        assert_eq!(app.sequencer.snapshot(), before);
    }

    #[test]
    fn tick_highlights_the_live_playhead() {
        let mut app = app();
        app.sequencer.play();
        pump(&mut app);
        let _ = app.update(Message::Tick);
        assert_eq!(app.grid.playhead_step(), Some(0));

        app.sequencer.stop();
        pump(&mut app);
        let _ = app.update(Message::Tick);
        assert_eq!(app.grid.playhead_step(), None);
    }

    #[test]
    fn unmap_gates_the_poll_and_remap_resumes() {
        let mut app = app();
        let _ = app.update(Message::Focused(false));
        assert!(!app.mapped);

        // While unmapped the model keeps moving; on remap a single tick
        // catches the highlight up without any rebuild
        app.sequencer.play();
        app.sequencer.stop();
        app.sequencer.play();
        pump(&mut app);
        let cells_before = app.grid.cells().len();

        let _ = app.update(Message::Focused(true));
        assert!(app.mapped);
        let _ = app.update(Message::Tick);
        assert_eq!(app.grid.playhead_step(), Some(0));
        assert_eq!(app.grid.cells().len(), cells_before);
        app.sequencer.stop();
    }

    #[test]
    fn export_snapshots_the_pattern() {
        let mut app = app();
        let _ = app.update(Message::Grid(GridMessage::ToggleStep(0)));
        let _ = app.update(Message::ExportRegion);
        let region = app.last_export.as_ref().expect("region exported");
        assert_eq!(region.step_count(), 16);
        assert_eq!(region.active_steps(), 1);
        assert!(!app.status.is_empty());
    }
}
