//! Chat domain: transcript, backend contract, and surface events.

pub mod backend;
pub mod message;
pub mod surface;

pub use backend::{AssistantReply, ChatBackend, MapData};
pub use message::{ChatMessage, MessageBody, MessageSender, Transcript};
pub use surface::{ChatEvent, ChatSurface, NullSurface};
