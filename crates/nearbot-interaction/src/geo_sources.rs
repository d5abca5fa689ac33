//! Geolocation source implementations.
//!
//! `IpApiGeoSource` queries an HTTP IP-geolocation endpoint;
//! `StaticGeoSource` serves a fixed configured coordinate. The active
//! source is selected from `GeoConfig`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use nearbot_core::config::{GeoConfig, GeoMode};
use nearbot_core::geo::{GeoSource, Location};
use nearbot_core::{NearbotError, Result};

const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// Positioning via an HTTP IP lookup (ip-api.com response shape).
pub struct IpApiGeoSource {
    client: Client,
    lookup_url: String,
}

impl IpApiGeoSource {
    pub fn new(lookup_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            lookup_url: lookup_url.into(),
        })
    }
}

#[async_trait]
impl GeoSource for IpApiGeoSource {
    async fn locate(&self) -> Result<Location> {
        let response = self.client.get(&self.lookup_url).send().await?;

        if !response.status().is_success() {
            return Err(NearbotError::geo(format!(
                "Lookup endpoint returned {}",
                response.status()
            )));
        }

        let body: IpApiResponse = response.json().await?;
        if body.status != "success" {
            return Err(NearbotError::geo(
                body.message
                    .unwrap_or_else(|| "Lookup reported failure".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Location::new(lat, lon)),
            _ => Err(NearbotError::geo("Lookup response had no coordinates")),
        }
    }
}

#[derive(Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Positioning pinned to a fixed configured coordinate.
pub struct StaticGeoSource {
    location: Location,
}

impl StaticGeoSource {
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

#[async_trait]
impl GeoSource for StaticGeoSource {
    async fn locate(&self) -> Result<Location> {
        Ok(self.location)
    }
}

/// Builds the configured source, or `None` when positioning is disabled.
pub fn source_from_config(config: &GeoConfig) -> Result<Option<Arc<dyn GeoSource>>> {
    match config.mode {
        GeoMode::Ip => Ok(Some(Arc::new(IpApiGeoSource::new(&config.lookup_url)?))),
        GeoMode::Static => match (config.static_lat, config.static_lng) {
            (Some(lat), Some(lng)) => {
                Ok(Some(Arc::new(StaticGeoSource::new(Location::new(lat, lng)))))
            }
            _ => Err(NearbotError::config(
                "geo.mode = \"static\" requires static_lat and static_lng",
            )),
        },
        GeoMode::Disabled => Ok(None),
    }
}
