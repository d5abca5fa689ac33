//! Session initialization and logout policy.
//!
//! A login handoff (if complete) overwrites the stored session, then the
//! stored session is validated against the 24-hour expiry. The store is
//! cleared on expiry or corruption, never on mere absence.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use nearbot_core::session::{LoginHandoff, Session, SessionRepository};

/// Result of session initialization.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// A valid, unexpired session. The shell renders the header next.
    Ready(Session),
    /// No usable session; the user must re-enter via the login flow.
    RedirectToLogin {
        url: String,
        /// Whether the store was cleared (expiry/corruption, not absence).
        cleared: bool,
    },
}

/// Gate in front of all chat/map functionality.
pub struct SessionGate {
    repository: Arc<dyn SessionRepository>,
    login_url: String,
}

impl SessionGate {
    pub fn new(repository: Arc<dyn SessionRepository>, login_url: impl Into<String>) -> Self {
        Self {
            repository,
            login_url: login_url.into(),
        }
    }

    /// Establishes or validates the session.
    ///
    /// Never fails: storage problems degrade to a redirect.
    pub async fn initialize(
        &self,
        handoff: Option<LoginHandoff>,
        now: DateTime<Utc>,
    ) -> SessionOutcome {
        if let Some(handoff) = handoff
            && let Some(session) = handoff.into_session(now)
        {
            tracing::info!(user_type = ?session.user_type, "New session from login handoff");
            if let Err(err) = self.repository.save(&session).await {
                tracing::warn!("Failed to persist handoff session: {}", err);
            }
        }

        let stored = match self.repository.load().await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!("Stored session unreadable, clearing: {}", err);
                return self.clear_and_redirect(now).await;
            }
        };

        match stored {
            None => SessionOutcome::RedirectToLogin {
                url: self.login_redirect_url(now),
                cleared: false,
            },
            Some(session) if session.is_expired(now) => {
                tracing::info!(session_id = %session.session_id, "Session expired");
                self.clear_and_redirect(now).await
            }
            Some(session) => SessionOutcome::Ready(session),
        }
    }

    /// Logs out if confirmed; declining performs no action.
    ///
    /// Returns the login redirect URL on a confirmed logout.
    pub async fn logout(&self, confirmed: bool, now: DateTime<Utc>) -> Option<String> {
        if !confirmed {
            return None;
        }
        if let Err(err) = self.repository.clear().await {
            tracing::warn!("Failed to clear session on logout: {}", err);
        }
        Some(self.login_redirect_url(now))
    }

    /// The login entry point with a cache-busting timestamp.
    pub fn login_redirect_url(&self, now: DateTime<Utc>) -> String {
        format!("{}?t={}", self.login_url, now.timestamp_millis())
    }

    async fn clear_and_redirect(&self, now: DateTime<Utc>) -> SessionOutcome {
        if let Err(err) = self.repository.clear().await {
            tracing::warn!("Failed to clear session store: {}", err);
        }
        SessionOutcome::RedirectToLogin {
            url: self.login_redirect_url(now),
            cleared: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use nearbot_core::session::UserType;
    use nearbot_infrastructure::TomlSessionRepository;
    use tempfile::TempDir;

    const LOGIN_URL: &str = "http://127.0.0.1:8000/login.html";

    fn gate_in(dir: &TempDir) -> (SessionGate, Arc<TomlSessionRepository>) {
        let repo = Arc::new(TomlSessionRepository::new(dir.path().join("session.toml")));
        (SessionGate::new(repo.clone(), LOGIN_URL), repo)
    }

    fn handoff() -> LoginHandoff {
        LoginHandoff {
            session_id: Some("s-1".to_string()),
            user_type: Some("authenticated".to_string()),
            user_name: Some("Mai".to_string()),
            user_picture: None,
            login_time: None,
        }
    }

    #[tokio::test]
    async fn test_fresh_session_grants_access_without_clearing() {
        let dir = TempDir::new().unwrap();
        let (gate, repo) = gate_in(&dir);
        let now = Utc::now();

        gate.initialize(Some(handoff()), now).await;
        let later = now + Duration::hours(23);

        let outcome = gate.initialize(None, later).await;
        assert!(matches!(outcome, SessionOutcome::Ready(_)));
        assert!(repo.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_session_at_24_hours_is_denied_and_cleared() {
        let dir = TempDir::new().unwrap();
        let (gate, repo) = gate_in(&dir);
        let now = Utc::now();

        gate.initialize(Some(handoff()), now).await;
        let later = now + Duration::hours(24);

        let outcome = gate.initialize(None, later).await;
        assert!(matches!(
            outcome,
            SessionOutcome::RedirectToLogin { cleared: true, .. }
        ));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_absent_session_redirects_without_clearing() {
        let dir = TempDir::new().unwrap();
        let (gate, _repo) = gate_in(&dir);

        let outcome = gate.initialize(None, Utc::now()).await;
        assert!(matches!(
            outcome,
            SessionOutcome::RedirectToLogin { cleared: false, .. }
        ));
    }

    #[tokio::test]
    async fn test_handoff_overwrites_stored_session() {
        let dir = TempDir::new().unwrap();
        let (gate, _repo) = gate_in(&dir);
        let now = Utc::now();

        gate.initialize(Some(handoff()), now).await;

        let mut second = handoff();
        second.session_id = Some("s-2".to_string());
        second.user_type = Some("guest".to_string());

        let outcome = gate.initialize(Some(second), now).await;
        let SessionOutcome::Ready(session) = outcome else {
            panic!("expected ready session");
        };
        assert_eq!(session.session_id, "s-2");
        assert_eq!(session.user_type, UserType::Guest);
    }

    #[tokio::test]
    async fn test_incomplete_handoff_establishes_nothing() {
        let dir = TempDir::new().unwrap();
        let (gate, _repo) = gate_in(&dir);

        let incomplete = LoginHandoff {
            user_type: Some("guest".to_string()),
            ..LoginHandoff::default()
        };
        let outcome = gate.initialize(Some(incomplete), Utc::now()).await;
        assert!(matches!(
            outcome,
            SessionOutcome::RedirectToLogin { cleared: false, .. }
        ));
    }

    #[tokio::test]
    async fn test_corrupt_store_is_cleared_and_redirected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.toml");
        std::fs::write(&path, "session_id = [not valid").unwrap();

        let repo = Arc::new(TomlSessionRepository::new(path.clone()));
        let gate = SessionGate::new(repo, LOGIN_URL);

        let outcome = gate.initialize(None, Utc::now()).await;
        assert!(matches!(
            outcome,
            SessionOutcome::RedirectToLogin { cleared: true, .. }
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_declined_logout_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let (gate, repo) = gate_in(&dir);
        let now = Utc::now();
        gate.initialize(Some(handoff()), now).await;

        assert!(gate.logout(false, now).await.is_none());
        assert!(repo.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_confirmed_logout_clears_and_redirects() {
        let dir = TempDir::new().unwrap();
        let (gate, repo) = gate_in(&dir);
        let now = Utc::now();
        gate.initialize(Some(handoff()), now).await;

        let url = gate.logout(true, now).await.unwrap();
        assert!(url.starts_with(LOGIN_URL));
        assert!(url.contains("?t="));
        assert!(repo.load().await.unwrap().is_none());
    }
}
