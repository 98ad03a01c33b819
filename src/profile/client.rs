//! Client for `PUT /api/profile`. One call is one request/response exchange:
//! no retries, no caching, no partial updates. Responses are decoded into a
//! typed result at this boundary so callers never see loosely shaped bodies.

use crate::{
    api::{self, HttpResponse},
    auth::session::SessionContext,
    config::AppConfig,
    errors::TransportError,
    profile::types::{ProfileSaved, ProfileUpdate},
    APP_USER_AGENT,
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info_span, Instrument};

pub const PROFILE_PATH: &str = "/api/profile";
/// Message surfaced when the server gives no usable error text.
pub const FALLBACK_ERROR: &str = "Unable to update the profile.";

/// Persists a profile snapshot.
pub trait ProfileApi {
    /// Sends `update` and returns the server confirmation.
    fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<ProfileSaved, TransportError>> + Send;
}

/// Response body of `/api/profile`, either shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProfileResponse {
    Saved { message: String },
    Rejected { error: String },
}

#[derive(Debug, Clone)]
pub struct HttpProfileClient {
    client: Client,
    url: String,
    access_token: Option<SecretString>,
}

impl HttpProfileClient {
    /// Builds a client for the configured API base, authenticated with the
    /// session's bearer token when there is one.
    ///
    /// # Errors
    /// Returns `TransportError::Config` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig, session: &SessionContext) -> Result<Self, TransportError> {
        Ok(Self {
            client: api::client(APP_USER_AGENT, config.timeout)?,
            url: api::build_url_with_base(&config.api_base_url, PROFILE_PATH),
            access_token: session.access_token().cloned(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ProfileApi for HttpProfileClient {
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileSaved, TransportError> {
        let span = info_span!(
            "profile.update",
            http.method = "PUT",
            url = %self.url
        );

        let mut request = self.client.put(&self.url).json(update);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = api::send(request).instrument(span).await?;
        debug!(status = %response.status, "profile update response");

        interpret(&response)
    }
}

fn interpret(response: &HttpResponse) -> Result<ProfileSaved, TransportError> {
    let status = response.status.as_u16();
    let decoded = response.json::<ProfileResponse>();

    if response.is_success() {
        return match decoded? {
            ProfileResponse::Saved { message } => Ok(ProfileSaved { message }),
            ProfileResponse::Rejected { error } => Err(TransportError::Http {
                status,
                message: api::sanitize_message(&error, FALLBACK_ERROR),
            }),
        };
    }

    let message = match decoded {
        Ok(ProfileResponse::Rejected { error }) => api::sanitize_message(&error, FALLBACK_ERROR),
        _ => FALLBACK_ERROR.to_string(),
    };

    Err(TransportError::Http { status, message })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        auth::session::Session,
        profile::types::{Preferences, UserProfile},
    };
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn update() -> ProfileUpdate {
        ProfileUpdate::from(&UserProfile {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@profilo.dev".to_string(),
            phone_number: "555".to_string(),
            bio: Some("Analyst".to_string()),
            website: None,
            preferences: Preferences {
                newsletter: true,
                marketing: false,
            },
        })
    }

    fn client_for(server: &MockServer, session: &SessionContext) -> HttpProfileClient {
        let config = AppConfig {
            api_base_url: server.uri(),
            ..AppConfig::default()
        };
        HttpProfileClient::new(&config, session).unwrap()
    }

    #[tokio::test]
    async fn update_profile_sends_snapshot_without_email() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/profile"))
            .and(header("Authorization", "Bearer session-token"))
            .and(body_json(json!({
                "fullName": "Ada Lovelace",
                "phoneNumber": "555",
                "bio": "Analyst",
                "website": null,
                "preferences": { "newsletter": true, "marketing": false }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Saved" })))
            .expect(1)
            .mount(&server)
            .await;

        let session = SessionContext::with_session(Session::from_access_token(
            SecretString::from("session-token".to_string()),
        ));
        let saved = client_for(&server, &session).update_profile(&update()).await?;
        assert_eq!(saved.message, "Saved");
        Ok(())
    }

    #[tokio::test]
    async fn error_body_is_surfaced_verbatim() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/profile"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "error": "X" })))
            .mount(&server)
            .await;

        let err = client_for(&server, &SessionContext::anonymous())
            .update_profile(&update())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Http {
                status: 422,
                message: "X".to_string()
            }
        );
        assert_eq!(err.user_message(), "X");
        Ok(())
    }

    #[tokio::test]
    async fn server_error_without_json_uses_fallback() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/profile"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server, &SessionContext::anonymous())
            .update_profile(&update())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message(), FALLBACK_ERROR);
        Ok(())
    }

    #[tokio::test]
    async fn anonymous_requests_carry_no_authorization() -> anyhow::Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
            .mount(&server)
            .await;

        client_for(&server, &SessionContext::anonymous())
            .update_profile(&update())
            .await?;

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let port = match TcpListener::bind("127.0.0.1:0") {
            Ok(listener) => listener.local_addr().unwrap().port(),
            Err(_) => {
                eprintln!("Skipping test: cannot bind localhost");
                return;
            }
        };
        let config = AppConfig {
            api_base_url: format!("http://127.0.0.1:{port}"),
            ..AppConfig::default()
        };
        let client = HttpProfileClient::new(&config, &SessionContext::anonymous()).unwrap();

        let err = client.update_profile(&update()).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)), "got {err:?}");
    }

    #[test]
    fn success_status_with_error_body_is_a_failure() {
        let response = HttpResponse {
            status: reqwest::StatusCode::OK,
            body: r#"{"error":"quota exceeded"}"#.to_string(),
        };
        assert_eq!(
            interpret(&response),
            Err(TransportError::Http {
                status: 200,
                message: "quota exceeded".to_string()
            })
        );
    }

    #[test]
    fn success_status_with_unexpected_body_is_a_parse_error() {
        let response = HttpResponse {
            status: reqwest::StatusCode::OK,
            body: r#"{"ok":true}"#.to_string(),
        };
        assert!(matches!(interpret(&response), Err(TransportError::Parse(_))));
    }

    #[test]
    fn client_error_with_blank_error_uses_fallback() {
        let response = HttpResponse {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: r#"{"error":"   "}"#.to_string(),
        };
        assert_eq!(
            interpret(&response).unwrap_err().user_message(),
            FALLBACK_ERROR
        );
    }

    #[test]
    fn url_joins_profile_path() {
        let config = AppConfig {
            api_base_url: "https://app.profilo.dev/".to_string(),
            ..AppConfig::default()
        };
        let client = HttpProfileClient::new(&config, &SessionContext::anonymous()).unwrap();
        assert_eq!(client.url(), "https://app.profilo.dev/api/profile");
    }
}
