//! Application configuration model.
//!
//! Persisted as `config.toml` under the platform config directory. Every
//! field has a serde default so a partial (or empty) file still loads.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub login: LoginConfig,
    #[serde(default)]
    pub geo: GeoConfig,
}

/// Chat backend endpoint settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Full URL of the `POST /chat` endpoint.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            chat_url: default_chat_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// External login flow settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoginConfig {
    /// Entry point the client redirects to when no valid session exists.
    #[serde(default = "default_login_url")]
    pub login_url: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            login_url: default_login_url(),
        }
    }
}

/// Which geolocation capability the client runs with.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeoMode {
    /// HTTP IP-geolocation lookup.
    #[default]
    Ip,
    /// Fixed coordinate from `static_lat`/`static_lng`.
    Static,
    /// No positioning capability available.
    Disabled,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GeoConfig {
    #[serde(default)]
    pub mode: GeoMode,
    /// Endpoint for the IP lookup mode.
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    #[serde(default)]
    pub static_lat: Option<f64>,
    #[serde(default)]
    pub static_lng: Option<f64>,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            mode: GeoMode::default(),
            lookup_url: default_lookup_url(),
            static_lat: None,
            static_lng: None,
        }
    }
}

fn default_chat_url() -> String {
    "http://127.0.0.1:8000/chat".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_login_url() -> String {
    "http://127.0.0.1:8000/login.html".to_string()
}

fn default_lookup_url() -> String {
    "http://ip-api.com/json".to_string()
}
