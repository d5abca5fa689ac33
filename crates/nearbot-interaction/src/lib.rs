//! Outbound integrations for the nearbot client: the chat API client and
//! geolocation sources.

pub mod chat_api_client;
pub mod geo_provider;
pub mod geo_sources;

pub use chat_api_client::{ChatApiClient, FALLBACK_REPLY};
pub use geo_provider::{GeoFix, GeoProvider};
pub use geo_sources::{IpApiGeoSource, StaticGeoSource, source_from_config};
