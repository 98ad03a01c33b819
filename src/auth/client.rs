//! Client for the hosted authentication provider (GoTrue-compatible `/auth/v1`
//! API). These helpers centralize the api key header and session handling so
//! callers only see redirects and `AuthError`s. Passwords and tokens are exposed
//! only when building request bodies and are never logged.

use crate::{
    api,
    auth::{
        session::{Session, SessionContext},
        types::{
            LoginCredentials, PasswordGrantRequest, Redirect, SignupDetails, SignupMetadata,
            SignupRequest, TokenResponse, HOME_REDIRECT, PROFILE_REDIRECT,
        },
    },
    config::AppConfig,
    errors::{AuthError, TransportError},
    APP_USER_AGENT,
};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info_span, instrument, warn, Instrument};
use url::Url;

/// Path prefix of the provider's auth API.
pub const AUTH_API_PREFIX: &str = "/auth/v1";
/// Path on the site that finishes email confirmation.
pub const EMAIL_CALLBACK_PATH: &str = "/auth/callback";

#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    site_origin: String,
}

impl AuthClient {
    /// # Errors
    /// Returns `TransportError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: api::client(APP_USER_AGENT, config.timeout)?,
            base_url: api::build_url_with_base(&config.auth_base_url, AUTH_API_PREFIX),
            api_key: config.auth_api_key.clone(),
            site_origin: config.site_origin.clone(),
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, TransportError> {
        let url = api::build_url_with_base(&self.base_url, path);
        let parsed = if query.is_empty() {
            Url::parse(&url)
        } else {
            Url::parse_with_params(&url, query)
        };
        parsed.map_err(|err| TransportError::Config(format!("Invalid auth URL '{url}': {err}")))
    }

    fn post(&self, url: Url) -> RequestBuilder {
        let request = self.client.post(url);
        let key = self.api_key.expose_secret();
        if key.is_empty() {
            request
        } else {
            request.header("apikey", key)
        }
    }

    /// Signs in with email and password. On success the session is stored in
    /// `context` and the caller should navigate to the profile page.
    ///
    /// # Errors
    /// `AuthError::InvalidCredentials` when the provider rejects the
    /// credentials, `AuthError::Transport` when it cannot be reached or fails.
    #[instrument(skip_all)]
    pub async fn login(
        &self,
        credentials: &LoginCredentials,
        context: &mut SessionContext,
    ) -> Result<Redirect, AuthError> {
        let url = self.endpoint("/token", &[("grant_type", "password")])?;
        let body = PasswordGrantRequest {
            email: credentials.email.trim(),
            password: credentials.password.expose_secret(),
        };

        let span = info_span!("auth.login", http.method = "POST");
        let response = api::send(self.post(url).json(&body))
            .instrument(span)
            .await?;

        if rejects_credentials(response.status) {
            debug!(status = %response.status, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        if !response.is_success() {
            return Err(provider_error(&response).into());
        }

        let token: TokenResponse = response.json()?;
        context.set_session(Session::from(token));

        Ok(PROFILE_REDIRECT)
    }

    /// Creates an account. The provider emails a confirmation link that
    /// returns to `{site_origin}/auth/callback`.
    ///
    /// # Errors
    /// `AuthError::SignupFailed` when the provider refuses the account (for
    /// example because it already exists), `AuthError::Transport` when it
    /// cannot be reached.
    #[instrument(skip_all)]
    pub async fn signup(&self, details: &SignupDetails) -> Result<(), AuthError> {
        let redirect_to = api::build_url_with_base(&self.site_origin, EMAIL_CALLBACK_PATH);
        let url = self.endpoint("/signup", &[("redirect_to", redirect_to.as_str())])?;
        let body = SignupRequest {
            email: details.email.trim(),
            password: details.password.expose_secret(),
            data: SignupMetadata {
                full_name: details.full_name.trim(),
                phone_number: details.phone_number.trim(),
            },
        };

        let span = info_span!("auth.signup", http.method = "POST");
        let response = api::send(self.post(url).json(&body))
            .instrument(span)
            .await?;

        if response.is_success() {
            Ok(())
        } else {
            debug!(status = %response.status, "signup rejected");
            Err(AuthError::SignupFailed)
        }
    }

    /// Ends the session. The local session is cleared even when the provider
    /// cannot be reached.
    #[instrument(skip_all)]
    pub async fn logout(&self, context: &mut SessionContext) -> Redirect {
        let Some(session) = context.clear_session() else {
            debug!("logout without a session");
            return HOME_REDIRECT;
        };

        let request = match self.endpoint("/logout", &[]) {
            Ok(url) => self
                .post(url)
                .bearer_auth(session.access_token.expose_secret()),
            Err(err) => {
                warn!(error = %err, "logout skipped provider call");
                return HOME_REDIRECT;
            }
        };

        let span = info_span!("auth.logout", http.method = "POST");
        match api::send(request).instrument(span).await {
            Ok(response) if response.is_success() => {}
            Ok(response) => warn!(status = %response.status, "provider refused logout"),
            Err(err) => warn!(error = %err, "provider logout failed"),
        }

        HOME_REDIRECT
    }
}

/// Picks a readable message out of a provider error body.
/// Statuses the provider uses for a bad email/password pair. Throttling and
/// other client errors are reported as provider failures.
fn rejects_credentials(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 400 | 401 | 403 | 422)
}

fn provider_error(response: &api::HttpResponse) -> TransportError {
    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap_or_default();
    let message = ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(serde_json::Value::as_str))
        .unwrap_or("");

    TransportError::Http {
        status: response.status.as_u16(),
        message: api::sanitize_message(message, "Authentication service unavailable."),
    }
}
