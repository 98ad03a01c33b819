use crate::config::ConfigOverrides;
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_AUTH_API_KEY: &str = "auth-api-key";
pub const ARG_SITE_ORIGIN: &str = "site-origin";
pub const ARG_SESSION_TOKEN: &str = "session-token";
pub const ARG_TIMEOUT: &str = "timeout";

const TIMEOUT_HELP: &str = "Request timeout in seconds (default: 10)";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the application serving /api/profile")
                .env("PROFILO_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long(ARG_AUTH_URL)
                .help("Base URL of the authentication provider (without /auth/v1)")
                .env("PROFILO_AUTH_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_AUTH_API_KEY)
                .long(ARG_AUTH_API_KEY)
                .help("Public API key sent to the authentication provider")
                .env("PROFILO_AUTH_API_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_SITE_ORIGIN)
                .long(ARG_SITE_ORIGIN)
                .help("Public origin of the site, used for email confirmation links")
                .env("PROFILO_SITE_ORIGIN")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_TOKEN)
                .long(ARG_SESSION_TOKEN)
                .help("Access token of an existing session")
                .env("PROFILO_SESSION_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help(TIMEOUT_HELP)
                .env("PROFILO_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..=300)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub overrides: ConfigOverrides,
    pub session_token: Option<SecretString>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let string = |id: &str| matches.get_one::<String>(id).cloned();

        Self {
            overrides: ConfigOverrides {
                api_base_url: string(ARG_API_URL),
                auth_base_url: string(ARG_AUTH_URL),
                auth_api_key: string(ARG_AUTH_API_KEY),
                site_origin: string(ARG_SITE_ORIGIN),
                timeout_secs: matches.get_one::<u64>(ARG_TIMEOUT).copied(),
            },
            session_token: string(ARG_SESSION_TOKEN)
                .filter(|token| !token.trim().is_empty())
                .map(|token| SecretString::from(token.trim().to_string())),
        }
    }
}
