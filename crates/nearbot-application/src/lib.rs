//! Use-case layer for the nearbot client: session gate, chat controller,
//! and the header/map views.

pub mod chat_controller;
pub mod header_view;
pub mod map_view;
pub mod session_gate;

pub use chat_controller::ChatController;
pub use header_view::{Header, HeaderAction, IdentityBadge};
pub use map_view::{MapView, Marker, Viewport};
pub use session_gate::{SessionGate, SessionOutcome};
