//! Command-line argument dispatch.
//!
//! Maps validated CLI matches to an [`Action`]. Global arguments are read from
//! the deepest subcommand's matches, where clap propagates them.

use crate::cli::{
    actions::{
        auth::{LoginArgs, SignupArgs},
        profile::{ShowArgs, UpdateArgs},
        Action,
    },
    commands::{auth, client, profile},
    globals::GlobalArgs,
};
use crate::{
    auth::{LoginCredentials, SignupDetails},
    config::AppConfig,
    profile::{FieldValue, ProfileField},
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::path::PathBuf;

/// Innermost subcommand matches.
#[must_use]
pub fn leaf(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("missing required argument: --{id}"))
}

fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let options = client::Options::parse(matches);
    let config = AppConfig::load(options.overrides).context("invalid client configuration")?;

    let mut globals = GlobalArgs::new(config);
    if let Some(token) = options.session_token {
        globals.set_token(token);
    }
    Ok(globals)
}

fn profile_file(matches: &ArgMatches) -> Result<PathBuf> {
    required(matches, profile::ARG_FILE).map(PathBuf::from)
}

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the configuration is
/// invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = globals(leaf(matches))?;

    match matches.subcommand() {
        Some((profile::CMD_PROFILE, sub)) => match sub.subcommand() {
            Some((profile::CMD_SHOW, show)) => Ok(Action::ProfileShow(ShowArgs {
                file: profile_file(show)?,
            })),
            Some((profile::CMD_UPDATE, update)) => Ok(Action::ProfileUpdate(
                globals,
                UpdateArgs {
                    file: profile_file(update)?,
                    edits: update
                        .get_many::<(ProfileField, FieldValue)>(profile::ARG_SET)
                        .map(|edits| edits.cloned().collect())
                        .unwrap_or_default(),
                    cancel: update.get_flag(profile::ARG_CANCEL),
                },
            )),
            _ => Err(anyhow!("unknown profile command")),
        },
        Some((auth::CMD_LOGIN, login)) => Ok(Action::Login(
            globals,
            LoginArgs {
                credentials: LoginCredentials {
                    email: required(login, auth::ARG_EMAIL)?.clone(),
                    password: SecretString::from(required(login, auth::ARG_PASSWORD)?.clone()),
                },
                print_token: login.get_flag(auth::ARG_PRINT_TOKEN),
            },
        )),
        Some((auth::CMD_SIGNUP, signup)) => Ok(Action::Signup(
            globals,
            SignupArgs {
                details: SignupDetails {
                    email: required(signup, auth::ARG_EMAIL)?.clone(),
                    password: SecretString::from(required(signup, auth::ARG_PASSWORD)?.clone()),
                    full_name: required(signup, auth::ARG_FULL_NAME)?.clone(),
                    phone_number: required(signup, auth::ARG_PHONE_NUMBER)?.clone(),
                },
            },
        )),
        Some((auth::CMD_LOGOUT, _)) => Ok(Action::Logout(globals)),
        _ => Err(anyhow!("unknown command")),
    }
}
