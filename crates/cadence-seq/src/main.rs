//! Cadence - step sequencer grid editor
//!
//! This is the main entry point for the GUI application. It:
//! 1. Loads the YAML config (pattern size, tempo, grid tuning)
//! 2. Builds the sequencer model the editor binds to
//! 3. Launches the iced application

mod config;
mod ui;

use std::sync::Arc;

use iced::Size;

use cadence_core::StepSequencer;
use ui::{Message, SeqApp};

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("cadence-seq starting up");

    let config_path = config::default_config_path();
    let config = config::load_config(&config_path);

    let sequencer = StepSequencer::new(
        config.pattern.clamped_step_count(),
        config.pattern.tempo_bpm,
    )
    .expect("clamped step count is always a valid pattern size");
    let sequencer = Arc::new(sequencer);

    let boot_config = config.clone();
    let boot_sequencer = sequencer.clone();

    iced::application(
        move || (SeqApp::new(boot_sequencer.clone(), &boot_config), iced::Task::none()),
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme)
    .title("Cadence")
    .window_size(Size::new(1000.0, 320.0))
    .run()
}

/// Update function for iced
fn update(app: &mut SeqApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &SeqApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &SeqApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme(app: &SeqApp) -> iced::Theme {
    app.theme()
}
