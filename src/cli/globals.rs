use crate::{
    auth::{Session, SessionContext},
    config::AppConfig,
};
use secrecy::SecretString;

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
    pub session_token: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            session_token: None,
        }
    }

    pub fn set_token(&mut self, token: SecretString) {
        self.session_token = Some(token);
    }

    /// Session context for the token given on the command line, if any.
    #[must_use]
    pub fn session(&self) -> SessionContext {
        self.session_token
            .clone()
            .map_or_else(SessionContext::anonymous, |token| {
                SessionContext::with_session(Session::from_access_token(token))
            })
    }
}
