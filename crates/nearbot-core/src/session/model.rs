//! Session domain model.
//!
//! A session is the client-held proof of identity handed off by the external
//! login flow. It lives in the local session store and expires 24 hours
//! after `login_time`.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum session age before access is denied and the store is cleared.
pub const SESSION_MAX_AGE_HOURS: i64 = 24;

/// How a user authenticated against the login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Anonymous visitor, no external identity.
    Guest,
    /// Identity established by the external login provider.
    Authenticated,
}

impl UserType {
    /// Parses the `user_type` value of a login handoff.
    ///
    /// Unknown values yield `None`; an unrecognized handoff establishes
    /// no session.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "guest" => Some(Self::Guest),
            "authenticated" => Some(Self::Authenticated),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

/// The session as held in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub user_type: UserType,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_picture: Option<String>,
    pub login_time: DateTime<Utc>,
}

impl Session {
    /// Age of the session relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.login_time
    }

    /// Whether the session has crossed the 24-hour expiry boundary.
    ///
    /// The boundary itself counts as expired: `age >= 24h` denies access.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.age(now) >= Duration::hours(SESSION_MAX_AGE_HOURS)
    }
}

/// Parameters passed back from the external login page.
///
/// The login flow redirects with URL-encoded query parameters; the shell
/// may also supply them as individual flags. A handoff only establishes a
/// session when both `session_id` and a parsable `user_type` are present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginHandoff {
    pub session_id: Option<String>,
    pub user_type: Option<String>,
    pub user_name: Option<String>,
    pub user_picture: Option<String>,
    pub login_time: Option<DateTime<Utc>>,
}

impl LoginHandoff {
    /// Parses a raw URL query string (`session_id=..&user_type=..`).
    ///
    /// Values are percent-decoded. Unknown keys are ignored; an
    /// unparsable `login_time` is treated as absent.
    pub fn from_query(query: &str) -> Self {
        let mut handoff = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            if value.is_empty() {
                continue;
            }
            match key {
                "session_id" => handoff.session_id = Some(value),
                "user_type" => handoff.user_type = Some(value),
                "user_name" => handoff.user_name = Some(value),
                "user_picture" => handoff.user_picture = Some(value),
                "login_time" => {
                    handoff.login_time = DateTime::parse_from_rfc3339(&value)
                        .ok()
                        .map(|t| t.with_timezone(&Utc));
                }
                _ => {}
            }
        }
        handoff
    }

    /// Mints a local guest handoff with a fresh v4 session id.
    pub fn local_guest(user_name: Option<String>) -> Self {
        Self {
            session_id: Some(Uuid::new_v4().to_string()),
            user_type: Some("guest".to_string()),
            user_name,
            user_picture: None,
            login_time: None,
        }
    }

    /// Converts the handoff into a session, if it is complete.
    ///
    /// `login_time` defaults to `now` when the login flow omitted it.
    pub fn into_session(self, now: DateTime<Utc>) -> Option<Session> {
        let session_id = self.session_id.filter(|id| !id.is_empty())?;
        let user_type = UserType::parse(self.user_type.as_deref()?)?;
        Some(Session {
            session_id,
            user_type,
            user_name: self.user_name.unwrap_or_default(),
            user_picture: self.user_picture,
            login_time: self.login_time.unwrap_or(now),
        })
    }
}
