pub mod auth;
pub mod profile;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    ProfileShow(profile::ShowArgs),
    ProfileUpdate(GlobalArgs, profile::UpdateArgs),
    Login(GlobalArgs, auth::LoginArgs),
    Signup(GlobalArgs, auth::SignupArgs),
    Logout(GlobalArgs),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
