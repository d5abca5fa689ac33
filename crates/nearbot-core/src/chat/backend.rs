//! Chat backend contract and reply shapes.

use async_trait::async_trait;

use crate::geo::Location;
use crate::store::Store;

/// Map payload extracted from a backend reply.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    /// The location the request was made with, if any.
    pub user_marker: Option<Location>,
    /// Nearby stores to pin.
    pub store_markers: Vec<Store>,
}

/// A backend reply adapted to the internal display shape.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    /// Markdown-capable reply text.
    pub text: String,
    /// Map payload; `None` when the backend call failed.
    pub map_data: Option<MapData>,
    /// Backend asks the client to re-request the user's geolocation.
    pub trigger_location: bool,
}

impl AssistantReply {
    /// A reply carrying only text, with no map payload.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            map_data: None,
            trigger_location: false,
        }
    }
}

/// The single request/response call to the external chat API.
///
/// Infallible at this boundary: implementations absorb transport and
/// status failures and map them to a fixed user-facing apology reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, message: &str, location: Option<Location>) -> AssistantReply;
}
