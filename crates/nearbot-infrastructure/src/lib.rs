//! Persistence and platform plumbing for the nearbot client.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod toml_session_repository;

pub use config_service::ConfigService;
pub use paths::NearbotPaths;
pub use toml_session_repository::TomlSessionRepository;
