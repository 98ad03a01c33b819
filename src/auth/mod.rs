//! Authentication actions backed by the hosted provider, plus the session
//! context they produce. This module touches security boundaries and must avoid
//! logging secrets or token material.
//!
//! Flow Overview: login exchanges email/password for a session and redirects to
//! the profile page. Signup creates the account and lets the provider send the
//! confirmation email. Logout revokes the session and always clears it locally.

pub mod client;
pub mod session;
pub mod types;

pub use client::AuthClient;
pub use session::{Session, SessionContext, SessionUser};
pub use types::{LoginCredentials, Redirect, SignupDetails};
