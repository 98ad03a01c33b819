//! `profile show` and `profile update`: the editor driven from the terminal.
//! The profile file plays the part of the page data; a refresh after a save
//! rewrites it with the saved snapshot.

use crate::{
    cli::globals::GlobalArgs,
    profile::{
        FieldValue, FormController, HttpProfileClient, Notification, NotificationKind,
        ProfileEditor, ProfileEvents, ProfileField, ProfileView, SaveOutcome, SubmitBlocked,
        UserProfile,
    },
};
use anyhow::{anyhow, bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug)]
pub struct ShowArgs {
    pub file: PathBuf,
}

#[derive(Debug)]
pub struct UpdateArgs {
    pub file: PathBuf,
    pub edits: Vec<(ProfileField, FieldValue)>,
    pub cancel: bool,
}

/// Prints notifications and remembers whether a refresh was requested.
#[derive(Debug, Default)]
pub struct ConsoleEvents {
    refresh_requested: bool,
}

impl ConsoleEvents {
    #[must_use]
    pub const fn refresh_requested(&self) -> bool {
        self.refresh_requested
    }
}

impl ProfileEvents for ConsoleEvents {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{} {}", notification.title, notification.description);
            }
            NotificationKind::Error => {
                eprintln!("{} {}", notification.title, notification.description);
            }
        }
    }

    fn refresh(&mut self) {
        self.refresh_requested = true;
    }
}

async fn load(path: &Path) -> Result<UserProfile> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read profile file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse profile file {}", path.display()))
}

async fn store(path: &Path, profile: &UserProfile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile).context("failed to serialize profile")?;
    tokio::fs::write(path, format!("{json}\n"))
        .await
        .with_context(|| format!("failed to write profile file {}", path.display()))
}

/// Render the profile form for the stored snapshot.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub async fn show(args: ShowArgs) -> Result<()> {
    let profile = load(&args.file).await?;
    print!("{}", ProfileView::build(&FormController::new(profile)));
    Ok(())
}

/// Apply edits and save them, or discard them with `--cancel`.
///
/// # Errors
/// Returns an error if the file cannot be used, an edit is refused, the form is
/// invalid, or the save fails.
pub async fn update(globals: GlobalArgs, args: UpdateArgs) -> Result<()> {
    let profile = load(&args.file).await?;
    let client = HttpProfileClient::new(&globals.config, &globals.session())
        .context("failed to build the profile client")?;
    let mut editor = ProfileEditor::new(profile, client, ConsoleEvents::default());

    for (field, value) in args.edits {
        debug!(field = %field, "applying edit");
        editor
            .set_field(field, value)
            .map_err(|err| anyhow!("cannot edit {}: {err}", field.cli_name()))?;
    }

    if args.cancel {
        editor.cancel()?;
        print!("{}", editor.view());
        println!("Changes discarded.");
        return Ok(());
    }

    print!("{}", editor.view());

    match editor.save().await {
        SaveOutcome::Saved(_) => {
            if editor.events().refresh_requested() {
                store(&args.file, editor.initial()).await?;
                info!(file = %args.file.display(), "profile file refreshed");
            }
            Ok(())
        }
        SaveOutcome::Blocked(SubmitBlocked::NotDirty) => {
            println!("No changes to save.");
            Ok(())
        }
        SaveOutcome::Blocked(blocked) => bail!("profile not saved: {blocked}"),
        SaveOutcome::Failed(message) => bail!("profile not saved: {message}"),
    }
}
