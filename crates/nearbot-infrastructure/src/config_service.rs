//! Configuration service implementation.
//!
//! Loads the application configuration from `config.toml`, writing the
//! default file on first run, and caches the result to avoid repeated
//! file I/O.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use nearbot_core::Result;
use nearbot_core::config::AppConfig;

use crate::paths::NearbotPaths;
use crate::storage::TomlDocument;

/// Configuration service that loads and caches the application config.
#[derive(Clone)]
pub struct ConfigService {
    document: Arc<TomlDocument<AppConfig>>,
    /// Cached configuration. RwLock for thread-safe lazy loading.
    cached: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    /// Creates a service over an explicit config file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            document: Arc::new(TomlDocument::new(path)),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service at the platform default location.
    pub fn from_default_location() -> Result<Self> {
        let path = NearbotPaths::new(None).config_file()?;
        Ok(Self::new(path))
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// An unreadable config falls back to defaults; startup never fails on
    /// a bad config file.
    pub fn get_config(&self) -> AppConfig {
        {
            let read_lock = self.cached.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_or_init().unwrap_or_else(|err| {
            tracing::warn!("Failed to load config, using defaults: {}", err);
            AppConfig::default()
        });

        {
            let mut write_lock = self.cached.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.cached.write().unwrap();
        *write_lock = None;
    }

    /// Loads the config file, creating it with defaults if missing.
    fn load_or_init(&self) -> Result<AppConfig> {
        match self.document.load()? {
            Some(config) => Ok(config),
            None => {
                let default_config = AppConfig::default();
                self.document.save(&default_config)?;
                tracing::info!(path = ?self.document.path(), "Wrote default config");
                Ok(default_config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nearbot_core::config::GeoMode;
    use tempfile::TempDir;

    #[test]
    fn test_first_access_writes_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());

        let config = service.get_config();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_existing_file_is_honored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[geo]\nmode = \"disabled\"\n").unwrap();

        let service = ConfigService::new(path);
        assert_eq!(service.get_config().geo.mode, GeoMode::Disabled);
    }

    #[test]
    fn test_config_is_cached_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());

        let first = service.get_config();
        std::fs::write(&path, "[geo]\nmode = \"static\"\n").unwrap();

        // Still cached
        assert_eq!(service.get_config(), first);

        service.invalidate_cache();
        assert_eq!(service.get_config().geo.mode, GeoMode::Static);
    }

    #[test]
    fn test_unreadable_config_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let service = ConfigService::new(path);
        assert_eq!(service.get_config(), AppConfig::default());
    }
}
