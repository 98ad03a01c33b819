use clap::{Arg, ArgAction, Command};

pub const CMD_LOGIN: &str = "login";
pub const CMD_SIGNUP: &str = "signup";
pub const CMD_LOGOUT: &str = "logout";

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_FULL_NAME: &str = "full-name";
pub const ARG_PHONE_NUMBER: &str = "phone-number";
pub const ARG_PRINT_TOKEN: &str = "print-token";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long(ARG_EMAIL)
        .help("Account email")
        .env("PROFILO_EMAIL")
        .required(true)
}

fn password_arg() -> Arg {
    Arg::new(ARG_PASSWORD)
        .short('p')
        .long(ARG_PASSWORD)
        .help("Account password")
        .env("PROFILO_PASSWORD")
        .hide_env_values(true)
        .required(true)
}

#[must_use]
pub fn login() -> Command {
    Command::new(CMD_LOGIN)
        .about("Sign in with email and password")
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new(ARG_PRINT_TOKEN)
                .long(ARG_PRINT_TOKEN)
                .help("Print the access token so it can be reused with --session-token")
                .action(ArgAction::SetTrue),
        )
}

#[must_use]
pub fn signup() -> Command {
    Command::new(CMD_SIGNUP)
        .about("Create an account; a confirmation email is sent")
        .arg(email_arg())
        .arg(password_arg())
        .arg(
            Arg::new(ARG_FULL_NAME)
                .long(ARG_FULL_NAME)
                .help("Full name stored with the account")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PHONE_NUMBER)
                .long(ARG_PHONE_NUMBER)
                .help("Phone number stored with the account")
                .required(true),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new(CMD_LOGOUT).about("End the session given by --session-token")
}
