//! Rendering surface contract.
//!
//! The chat controller mirrors every transcript and map mutation to a
//! surface as an event. The console shell prints them; tests record them.

use super::message::ChatMessage;
use crate::store::Store;

/// One observable UI mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// A message was appended to the transcript.
    MessageAppended(ChatMessage),
    /// A typing placeholder was shown with the given label.
    TypingStarted(String),
    /// The current typing placeholder was removed.
    TypingCleared,
    /// A store-card list should be rendered, one card per store.
    StoreCards(Vec<Store>),
    /// The map view state changed.
    MapUpdated,
    /// A user-facing alert (never a crash).
    Alert(String),
}

/// Sink for chat events.
pub trait ChatSurface: Send + Sync {
    fn on_event(&self, event: ChatEvent);
}

/// A surface that drops every event. Useful for headless runs.
#[derive(Debug, Default)]
pub struct NullSurface;

impl ChatSurface for NullSurface {
    fn on_event(&self, _event: ChatEvent) {}
}
