//! Unified path management for nearbot files.
//!
//! All nearbot state lives under one per-user config directory:
//!
//! ```text
//! ~/.config/nearbot/           # Config directory (platform-specific)
//! ├── config.toml              # Application configuration
//! ├── session.toml             # The client-held session
//! └── logs/                    # Application logs
//! ```

use std::path::PathBuf;

use nearbot_core::{NearbotError, Result};

/// Resolves nearbot file locations.
///
/// An explicit root overrides platform resolution; tests point this at a
/// temporary directory.
#[derive(Debug, Clone, Default)]
pub struct NearbotPaths {
    override_root: Option<PathBuf>,
}

impl NearbotPaths {
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    /// Returns the nearbot configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.override_root {
            return Ok(root.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("nearbot"))
            .ok_or_else(|| NearbotError::config("Cannot find home directory"))
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored session document.
    pub fn session_file(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("session.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf> {
        Ok(self.config_dir()?.join("logs"))
    }
}
