//! Retail store model.

use serde::{Deserialize, Serialize};

/// A physical store returned by the chat backend.
///
/// Transient: held only as long as needed to render map markers and the
/// store-card list. The backend's `address` field arrives here as
/// `description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
}
