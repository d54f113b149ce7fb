//! Message handlers for SeqApp
//!
//! Each handler module is responsible for a specific category of messages.
//! Handlers receive `&mut SeqApp` and return `Task<Message>`.

pub mod grid;
pub mod sequencer_events;
pub mod tick;
pub mod transport;
