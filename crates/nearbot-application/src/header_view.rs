//! Chat header view.
//!
//! `render` recomputes the header purely from session fields; no state is
//! kept between renders, so stale action handlers cannot exist. Exactly
//! one of three identity variants is produced, selected by `user_type`
//! and the presence of a picture.

use nearbot_core::session::Session;

pub const HEADER_TITLE: &str = "Virtual Assistant";
/// Shown when the login flow supplied no display name.
pub const DEFAULT_USER_NAME: &str = "User";
pub const GUEST_LABEL: &str = "Guest";

/// How the user is presented in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityBadge {
    /// Authenticated user with a profile picture.
    Avatar { picture: String, name: String },
    /// Authenticated user without a picture.
    Named { name: String },
    /// Anonymous visitor.
    Guest,
}

/// The single action button the header offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    /// Redirects to the login entry point.
    Login,
    /// Clears the session, then redirects. Requires confirmation.
    Logout,
}

/// The fully recomputed header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: &'static str,
    pub identity: IdentityBadge,
    pub action: HeaderAction,
}

/// Renders the header for a session.
pub fn render(session: &Session) -> Header {
    let name = if session.user_name.is_empty() {
        DEFAULT_USER_NAME.to_string()
    } else {
        session.user_name.clone()
    };

    let identity = if session.user_type.is_authenticated() {
        match &session.user_picture {
            Some(picture) => IdentityBadge::Avatar {
                picture: picture.clone(),
                name,
            },
            None => IdentityBadge::Named { name },
        }
    } else {
        IdentityBadge::Guest
    };

    let action = if session.user_type.is_authenticated() {
        HeaderAction::Logout
    } else {
        HeaderAction::Login
    };

    Header {
        title: HEADER_TITLE,
        identity,
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nearbot_core::session::UserType;

    fn session(user_type: UserType, name: &str, picture: Option<&str>) -> Session {
        Session {
            session_id: "s-1".to_string(),
            user_type,
            user_name: name.to_string(),
            user_picture: picture.map(|p| p.to_string()),
            login_time: Utc::now(),
        }
    }

    #[test]
    fn test_authenticated_with_picture_renders_avatar() {
        let header = render(&session(
            UserType::Authenticated,
            "Mai",
            Some("https://example.com/mai.jpg"),
        ));
        assert_eq!(
            header.identity,
            IdentityBadge::Avatar {
                picture: "https://example.com/mai.jpg".to_string(),
                name: "Mai".to_string(),
            }
        );
        assert_eq!(header.action, HeaderAction::Logout);
    }

    #[test]
    fn test_authenticated_without_picture_renders_named() {
        let header = render(&session(UserType::Authenticated, "Mai", None));
        assert_eq!(
            header.identity,
            IdentityBadge::Named {
                name: "Mai".to_string()
            }
        );
        assert_eq!(header.action, HeaderAction::Logout);
    }

    #[test]
    fn test_guest_renders_guest_even_with_picture() {
        let header = render(&session(
            UserType::Guest,
            "Someone",
            Some("https://example.com/p.jpg"),
        ));
        assert_eq!(header.identity, IdentityBadge::Guest);
        assert_eq!(header.action, HeaderAction::Login);
    }

    #[test]
    fn test_empty_name_falls_back_to_default() {
        let header = render(&session(UserType::Authenticated, "", None));
        assert_eq!(
            header.identity,
            IdentityBadge::Named {
                name: DEFAULT_USER_NAME.to_string()
            }
        );
    }

    #[test]
    fn test_render_is_stateless() {
        let s = session(UserType::Authenticated, "Mai", None);
        assert_eq!(render(&s), render(&s));
    }
}
