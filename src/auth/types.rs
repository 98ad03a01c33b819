//! Request and response types for the authentication provider. Credentials and
//! tokens pass through these types, so they must never be logged.

use crate::auth::session::{Session, SessionUser};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Where the caller should navigate after an auth action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect(pub &'static str);

pub const PROFILE_REDIRECT: Redirect = Redirect("/profile");
pub const HOME_REDIRECT: Redirect = Redirect("/");

#[derive(Clone, Debug)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Clone, Debug)]
pub struct SignupDetails {
    pub email: String,
    pub password: SecretString,
    pub full_name: String,
    pub phone_number: String,
}

#[derive(Serialize)]
pub(crate) struct PasswordGrantRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignupMetadata<'a>,
}

#[derive(Serialize)]
pub(crate) struct SignupMetadata<'a> {
    pub full_name: &'a str,
    pub phone_number: &'a str,
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl From<TokenResponse> for Session {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: SecretString::from(response.access_token),
            refresh_token: response.refresh_token.map(SecretString::from),
            expires_in: response.expires_in,
            user: response.user,
        }
    }
}
