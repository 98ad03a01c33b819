//! Error types shared by the profile and auth clients. Messages carried by these
//! errors are shown to users, so they must never contain secrets or tokens.

use thiserror::Error;

/// Failures talking to a remote endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
}

impl TransportError {
    /// Text for the notification surface. Server-provided messages are
    /// returned verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { message, .. } => message.clone(),
            Self::Config(message)
            | Self::Network(message)
            | Self::Timeout(message)
            | Self::Parse(message)
            | Self::Serialization(message) => message.clone(),
        }
    }

    /// HTTP status of a rejected request, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of the login/signup/logout actions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Unable to create the account. The user may already exist.")]
    SignupFailed,
    #[error(transparent)]
    Transport(#[from] TransportError),
}
