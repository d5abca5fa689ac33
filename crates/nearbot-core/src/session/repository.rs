//! Session persistence contract.

use async_trait::async_trait;

use super::model::Session;
use crate::error::Result;

/// Storage for the single client-held session.
///
/// Implementations persist at most one session per installation. Expiry is
/// a policy concern and is enforced by the session gate, not here.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Returns the stored session, or `None` when no session exists.
    async fn load(&self) -> Result<Option<Session>>;

    /// Persists `session`, replacing any previously stored one.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}
