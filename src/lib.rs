//! # Profilo (account profile client)
//!
//! `profilo` edits a user's account profile and talks to the hosted
//! authentication provider that owns their session.
//!
//! ## Profile editing
//!
//! The profile flow is a small pipeline:
//!
//! 1. **Schema:** [`profile::schema`] validates each field on change and the
//!    whole record before submit.
//! 2. **Form:** [`profile::form::FormController`] holds the editable values,
//!    the baseline snapshot used for dirtiness, and per-field errors.
//! 3. **Mutation:** [`profile::mutation::MutationOrchestrator`] runs one
//!    `PUT /api/profile` per submit and tracks its pending/success/error state.
//! 4. **Editor:** [`profile::editor::ProfileEditor`] wires the above together and
//!    emits notifications and refresh signals.
//!
//! The email address is displayed but never submitted.
//!
//! ## Authentication
//!
//! Login, signup and logout are delegated to a GoTrue-compatible provider. The
//! resulting session lives in an explicit [`auth::session::SessionContext`]
//! that callers pass to whatever needs identity. Passwords and tokens are kept
//! in `SecretString` and must never be logged.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod profile;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
