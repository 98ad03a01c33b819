use crate::cli::actions::{auth, profile, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::ProfileShow(args) => profile::show(args).await,
        Action::ProfileUpdate(globals, args) => profile::update(globals, args).await,
        Action::Login(globals, args) => auth::login(globals, args).await,
        Action::Signup(globals, args) => auth::signup(globals, args).await,
        Action::Logout(globals) => auth::logout(globals).await,
    }
}
