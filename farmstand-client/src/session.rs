//! Session state for the authentication gate
//!
//! Auth is an explicit lifecycle value, not an ambient boolean. The
//! session is handed to whatever issues requests; the bearer token rides
//! on the transport for as long as the session is live.

/// An authenticated session as returned by the auth collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: String,
    pub token: String,
}

/// Authentication lifecycle.
///
/// Transitions: `Unauthenticated -> Authenticating -> Authenticated`, back
/// to `Unauthenticated` on login failure or logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated(Session),
}

impl SessionState {
    /// Checks if a login has completed
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Checks if a login attempt is in flight
    pub fn is_authenticating(&self) -> bool {
        matches!(self, Self::Authenticating)
    }

    /// Returns the live session, if any
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Returns the logged-in username, if any
    pub fn username(&self) -> Option<&str> {
        self.session().map(|s| s.username.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert!(!state.is_authenticating());
        assert!(state.session().is_none());
        assert!(state.username().is_none());
    }

    #[test]
    fn authenticated_exposes_session() {
        let state = SessionState::Authenticated(Session {
            username: "ana".into(),
            role: "manager".into(),
            token: "tok".into(),
        });
        assert!(state.is_authenticated());
        assert_eq!(state.username(), Some("ana"));
        assert_eq!(state.session().map(|s| s.token.as_str()), Some("tok"));
    }

    #[test]
    fn authenticating_is_not_authenticated() {
        let state = SessionState::Authenticating;
        assert!(state.is_authenticating());
        assert!(!state.is_authenticated());
        assert!(state.session().is_none());
    }
}
