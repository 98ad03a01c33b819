//! Client configuration for the profile API and the authentication provider.
//! Values come from CLI arguments or their `PROFILO_*` environment variables and
//! fall back to local development defaults. Only the provider API key is
//! sensitive; it stays in a `SecretString`.

use crate::errors::TransportError;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:54321";
pub const DEFAULT_SITE_ORIGIN: &str = "http://localhost:3000";
/// Default request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub auth_base_url: String,
    pub auth_api_key: SecretString,
    pub site_origin: String,
    pub timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            auth_api_key: SecretString::default(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Raw values collected from the command line; `None` keeps the default.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub auth_base_url: Option<String>,
    pub auth_api_key: Option<String>,
    pub site_origin: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Builds a config from defaults and applies non-empty overrides.
    ///
    /// # Errors
    /// Returns `TransportError::Config` if a base URL or the site origin is not
    /// an absolute http(s) URL, or if the timeout is zero.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, TransportError> {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), TransportError> {
        for (name, value) in [
            ("api base URL", &self.api_base_url),
            ("auth base URL", &self.auth_base_url),
            ("site origin", &self.site_origin),
        ] {
            let parsed = Url::parse(value)
                .map_err(|err| TransportError::Config(format!("Invalid {name} '{value}': {err}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(TransportError::Config(format!(
                    "Invalid {name} '{value}': unsupported scheme {}",
                    parsed.scheme()
                )));
            }
        }

        if self.timeout.is_zero() {
            return Err(TransportError::Config(
                "Request timeout must be at least one second.".to_string(),
            ));
        }

        Ok(())
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: ConfigOverrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_url) {
        config.api_base_url = value;
    }
    if let Some(value) = overrides.auth_base_url.as_deref().and_then(normalize_url) {
        config.auth_base_url = value;
    }
    if let Some(value) = overrides.auth_api_key.as_deref().and_then(normalize_value) {
        config.auth_api_key = SecretString::from(value);
    }
    if let Some(value) = overrides.site_origin.as_deref().and_then(normalize_url) {
        config.site_origin = value;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn normalize_url(value: &str) -> Option<String> {
    normalize_value(value).map(|value| value.trim_end_matches('/').to_string())
}
