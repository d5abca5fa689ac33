//! Caching geolocation provider.
//!
//! Wraps an optional positioning source with a last-known-location cache.
//! `acquire` never fails: a failing query falls back to the cache, and an
//! empty cache degrades to `Unavailable`.

use std::sync::Arc;

use nearbot_core::geo::{GeoSource, Location};

/// Outcome of one location acquisition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoFix {
    /// A new fix from the source; the cache was updated.
    Fresh(Location),
    /// The source failed or is absent; the cached fix was returned.
    Cached(Location),
    /// No fix available.
    Unavailable {
        /// A query was attempted and failed with nothing to fall back on;
        /// the user should see an alert.
        should_alert: bool,
    },
}

impl GeoFix {
    /// The resolved location, if any.
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::Fresh(loc) | Self::Cached(loc) => Some(*loc),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Location provider with graceful degradation.
pub struct GeoProvider {
    source: Option<Arc<dyn GeoSource>>,
    cached: Option<Location>,
}

impl GeoProvider {
    /// Creates a provider. `None` means no positioning capability.
    pub fn new(source: Option<Arc<dyn GeoSource>>) -> Self {
        Self {
            source,
            cached: None,
        }
    }

    /// Acquires the current location.
    pub async fn acquire(&mut self) -> GeoFix {
        let Some(source) = &self.source else {
            return match self.cached {
                Some(loc) => GeoFix::Cached(loc),
                None => GeoFix::Unavailable {
                    should_alert: false,
                },
            };
        };

        match source.locate().await {
            Ok(location) => {
                self.cached = Some(location);
                GeoFix::Fresh(location)
            }
            Err(err) => {
                tracing::warn!("Geolocation query failed: {}", err);
                match self.cached {
                    Some(loc) => GeoFix::Cached(loc),
                    None => GeoFix::Unavailable { should_alert: true },
                }
            }
        }
    }

    /// The last successfully acquired location, if any.
    pub fn last_known(&self) -> Option<Location> {
        self.cached
    }
}
