//! Geolocation capability contract.

use async_trait::async_trait;

use super::model::Location;
use crate::error::Result;

/// A source of the user's current location.
///
/// Implementations query whatever positioning capability the platform
/// offers (an HTTP IP lookup, a fixed configured coordinate, ...). Errors
/// are expected and are absorbed by the caching provider one layer up.
#[async_trait]
pub trait GeoSource: Send + Sync {
    /// Queries the current location once.
    async fn locate(&self) -> Result<Location>;
}
