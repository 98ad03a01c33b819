//! Session context handed explicitly to components that need the user's
//! identity. Only the token and non-sensitive user metadata are kept; tokens are
//! `SecretString` so they never show up in debug output.

use secrecy::SecretString;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
    pub expires_in: Option<u64>,
    pub user: Option<SessionUser>,
}

impl Session {
    /// Session known only by its bearer token, e.g. one passed on the command line.
    #[must_use]
    pub const fn from_access_token(access_token: SecretString) -> Self {
        Self {
            access_token,
            refresh_token: None,
            expires_in: None,
            user: None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    session: Option<Session>,
}

impl SessionContext {
    /// Context without a session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_session(session: Session) -> Self {
        Self {
            session: Some(session),
        }
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&SecretString> {
        self.session.as_ref().map(|session| &session.access_token)
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Updates the in-memory session after login.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Clears the in-memory session, typically on logout.
    pub fn clear_session(&mut self) -> Option<Session> {
        self.session.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn context_tracks_session_lifecycle() {
        let mut context = SessionContext::anonymous();
        assert!(!context.is_authenticated());
        assert!(context.access_token().is_none());

        context.set_session(Session::from_access_token(SecretString::from("tok".to_string())));
        assert!(context.is_authenticated());
        assert_eq!(
            context.access_token().map(|token| token.expose_secret()),
            Some("tok")
        );

        assert!(context.clear_session().is_some());
        assert!(!context.is_authenticated());
    }

    #[test]
    fn debug_output_redacts_tokens() {
        let context =
            SessionContext::with_session(Session::from_access_token(SecretString::from("tok-123".to_string())));
        assert!(!format!("{context:?}").contains("tok-123"));
    }
}
