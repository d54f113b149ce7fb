//! UI layer for cadence-seq

pub mod app;
pub mod handlers;
pub mod message;

pub use app::SeqApp;
pub use message::Message;
