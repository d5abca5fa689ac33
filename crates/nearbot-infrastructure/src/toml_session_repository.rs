//! TOML-backed session repository.
//!
//! Persists the single client-held session as `session.toml` under the
//! nearbot config directory, through the atomic document storage.

use std::path::PathBuf;

use async_trait::async_trait;

use nearbot_core::Result;
use nearbot_core::session::{Session, SessionRepository};

use crate::paths::NearbotPaths;
use crate::storage::TomlDocument;

/// Session repository over one TOML document.
pub struct TomlSessionRepository {
    document: TomlDocument<Session>,
}

impl TomlSessionRepository {
    /// Creates a repository over an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            document: TomlDocument::new(path),
        }
    }

    /// Creates a repository at the platform default location.
    pub fn from_default_location() -> Result<Self> {
        let path = NearbotPaths::new(None).session_file()?;
        Ok(Self::new(path))
    }
}

#[async_trait]
impl SessionRepository for TomlSessionRepository {
    async fn load(&self) -> Result<Option<Session>> {
        self.document.load()
    }

    async fn save(&self, session: &Session) -> Result<()> {
        tracing::debug!(session_id = %session.session_id, "Saving session");
        self.document.save(session)
    }

    async fn clear(&self) -> Result<()> {
        tracing::debug!("Clearing stored session");
        self.document.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nearbot_core::session::UserType;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            session_id: "s-42".to_string(),
            user_type: UserType::Authenticated,
            user_name: "Mai".to_string(),
            user_picture: Some("https://example.com/mai.jpg".to_string()),
            login_time: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::new(temp_dir.path().join("session.toml"));

        let session = sample_session();
        repo.save(&session).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn test_load_without_store_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::new(temp_dir.path().join("session.toml"));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_session() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::new(temp_dir.path().join("session.toml"));

        repo.save(&sample_session()).await.unwrap();

        let mut replacement = sample_session();
        replacement.session_id = "s-43".to_string();
        replacement.user_type = UserType::Guest;
        repo.save(&replacement).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.session_id, "s-43");
        assert_eq!(loaded.user_type, UserType::Guest);
    }

    #[tokio::test]
    async fn test_clear_removes_session() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::new(temp_dir.path().join("session.toml"));

        repo.save(&sample_session()).await.unwrap();
        repo.clear().await.unwrap();

        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let repo = TomlSessionRepository::new(temp_dir.path().join("session.toml"));
        repo.clear().await.unwrap();
    }
}
