//! Chat transcript types.
//!
//! The transcript is an append-only sequence of messages plus at most one
//! transient typing placeholder. It lives for the process lifetime and is
//! never persisted.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageSender {
    /// Message typed by the user.
    User,
    /// Message from the assistant.
    Assistant,
}

/// Message content, typed by how the surface should render it.
///
/// Assistant replies are markdown-capable; user input stays plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageBody {
    Plain(String),
    Markdown(String),
}

impl MessageBody {
    /// The raw text regardless of rendering hint.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Markdown(text) => text,
        }
    }
}

/// A single entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: MessageSender,
    pub body: MessageBody,
}

impl ChatMessage {
    /// A plain-text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::User,
            body: MessageBody::Plain(text.into()),
        }
    }

    /// A markdown-capable assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: MessageSender::Assistant,
            body: MessageBody::Markdown(text.into()),
        }
    }
}

/// The ordered chat log for one page session.
///
/// At most one typing placeholder exists at a time; showing a new one
/// replaces the current one, and clearing removes whichever placeholder
/// is current.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    typing: Option<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the log.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Shows a typing placeholder with the given label.
    pub fn show_typing(&mut self, label: impl Into<String>) {
        self.typing = Some(label.into());
    }

    /// Removes the current typing placeholder, if any.
    ///
    /// Returns whether a placeholder was present.
    pub fn clear_typing(&mut self) -> bool {
        self.typing.take().is_some()
    }

    /// The current typing placeholder label.
    pub fn typing(&self) -> Option<&str> {
        self.typing.as_deref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
