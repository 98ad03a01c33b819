use crate::{
    auth::{AuthClient, LoginCredentials, SessionContext, SignupDetails},
    cli::globals::GlobalArgs,
};
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use tracing::debug;

#[derive(Debug)]
pub struct LoginArgs {
    pub credentials: LoginCredentials,
    pub print_token: bool,
}

#[derive(Debug)]
pub struct SignupArgs {
    pub details: SignupDetails,
}

fn auth_client(globals: &GlobalArgs) -> Result<AuthClient> {
    AuthClient::new(&globals.config).context("failed to build the auth client")
}

/// Sign in and print where to go next.
///
/// # Errors
/// Returns an error if the credentials are rejected or the provider fails.
pub async fn login(globals: GlobalArgs, args: LoginArgs) -> Result<()> {
    let client = auth_client(&globals)?;
    let mut session = SessionContext::anonymous();

    let redirect = client.login(&args.credentials, &mut session).await?;
    debug!(redirect = redirect.0, "login succeeded");

    println!("Logged in. Continue at {}", redirect.0);
    if args.print_token {
        if let Some(token) = session.access_token() {
            println!("{}", token.expose_secret());
        }
    }

    Ok(())
}

/// Create the account; the provider sends the confirmation email.
///
/// # Errors
/// Returns an error if the provider refuses the account or cannot be reached.
pub async fn signup(globals: GlobalArgs, args: SignupArgs) -> Result<()> {
    let client = auth_client(&globals)?;
    client.signup(&args.details).await?;

    println!("Account created. Check {} to confirm it.", args.details.email.trim());
    Ok(())
}

/// End the session. Never fails once the client is built.
///
/// # Errors
/// Returns an error only if the auth client cannot be built.
pub async fn logout(globals: GlobalArgs) -> Result<()> {
    let client = auth_client(&globals)?;
    let mut session = globals.session();

    let redirect = client.logout(&mut session).await;
    println!("Logged out. Continue at {}", redirect.0);
    Ok(())
}
