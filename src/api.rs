//! HTTP helpers for JSON APIs with consistent timeouts and error handling. The
//! profile and auth clients use these helpers to avoid duplicating request setup.
//! The helpers do not store secrets or tokens; they only attach headers provided
//! by callers.

use crate::errors::TransportError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Raw response captured before any interpretation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    /// Returns `TransportError::Parse` when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_str(&self.body)
            .map_err(|err| TransportError::Parse(format!("Failed to decode response: {err}")))
    }
}

/// Builds a client with the user agent and timeout policy.
///
/// # Errors
/// Returns `TransportError::Config` if the TLS backend cannot be initialized.
pub fn client(user_agent: &str, timeout: Duration) -> Result<Client, TransportError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|err| TransportError::Config(format!("Failed to build HTTP client: {err}")))
}

/// Builds a URL from an explicit base URL and the provided path.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Sends a prepared request and reads the whole body.
///
/// # Errors
/// Returns `TransportError::Timeout` or `TransportError::Network` when the
/// server cannot be reached or the body cannot be read.
pub async fn send(request: RequestBuilder) -> Result<HttpResponse, TransportError> {
    let response = request.send().await.map_err(map_request_error)?;
    let status = response.status();
    let body = response.text().await.map_err(map_request_error)?;

    Ok(HttpResponse { status, body })
}

/// Maps network errors into user-facing variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        TransportError::Serialization(format!("Failed to build request: {err}"))
    } else {
        TransportError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Sanitizes HTTP error text for user-facing messages by trimming and truncating.
/// Falls back to `fallback` when nothing usable is left.
#[must_use]
pub fn sanitize_message(message: &str, fallback: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_with_base_joins_slashes() {
        assert_eq!(
            build_url_with_base("https://app.profilo.dev/", "/api/profile"),
            "https://app.profilo.dev/api/profile"
        );
        assert_eq!(
            build_url_with_base("https://app.profilo.dev", "api/profile"),
            "https://app.profilo.dev/api/profile"
        );
        assert_eq!(build_url_with_base("  ", "/api/profile"), "/api/profile");
    }

    #[test]
    fn sanitize_message_trims_truncates_and_falls_back() {
        assert_eq!(sanitize_message("  nope  ", "fallback"), "nope");
        assert_eq!(sanitize_message("   ", "fallback"), "fallback");
        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_message(&long, "fallback").len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn http_response_json_reports_parse_errors() {
        let response = HttpResponse {
            status: StatusCode::OK,
            body: "<html>".to_string(),
        };
        let result = response.json::<serde_json::Value>();
        assert!(matches!(result, Err(TransportError::Parse(_))));
        assert!(response.is_success());
    }
}
