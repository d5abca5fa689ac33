//! Geographic coordinate model.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
///
/// Held in process memory only; the last successful fix doubles as a
/// fallback cache across failed queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}
