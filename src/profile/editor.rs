//! Profile editor: binds the form to the mutation lifecycle and reports results
//! through a [`ProfileEvents`] sink (notifications and refresh requests).
//! Validation problems stay inline on the form; only write results become
//! notifications.

use crate::profile::{
    client::ProfileApi,
    form::{FormController, FormError, SubmitBlocked},
    mutation::{MutationOrchestrator, MutationState},
    types::{FieldValue, ProfileField, UserProfile},
    view::ProfileView,
};
use tracing::{debug, info, warn};

pub const SUCCESS_TITLE: &str = "Success!";
pub const ERROR_TITLE: &str = "Uh oh! Something went wrong.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the notification surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    #[must_use]
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: SUCCESS_TITLE.to_string(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: ERROR_TITLE.to_string(),
            description: description.into(),
        }
    }
}

/// Side effects requested by the editor.
pub trait ProfileEvents {
    fn notify(&mut self, notification: Notification);

    /// The saved profile superseded what the surrounding page showed.
    fn refresh(&mut self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(String),
    Failed(String),
    Blocked(SubmitBlocked),
}

#[derive(Debug)]
pub struct ProfileEditor<C, E> {
    initial: UserProfile,
    form: FormController,
    mutation: MutationOrchestrator<C>,
    events: E,
}

impl<C: ProfileApi, E: ProfileEvents> ProfileEditor<C, E> {
    pub fn new(initial: UserProfile, client: C, events: E) -> Self {
        Self {
            form: FormController::new(initial.clone()),
            initial,
            mutation: MutationOrchestrator::new(client),
            events,
        }
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn mutation_state(&self) -> &MutationState {
        self.mutation.state()
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn client(&self) -> &C {
        self.mutation.client()
    }

    /// Snapshot that cancel returns to.
    pub fn initial(&self) -> &UserProfile {
        &self.initial
    }

    /// # Errors
    /// See [`FormController::set_field`].
    pub fn set_field(&mut self, field: ProfileField, value: FieldValue) -> Result<(), FormError> {
        self.form.set_field(field, value)?;
        self.mutation.acknowledge();
        Ok(())
    }

    /// Discards edits and returns to the last loaded or saved profile.
    ///
    /// # Errors
    /// Returns `FormError::Pending` while a save is in flight.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        if self.form.is_pending() {
            return Err(FormError::Pending);
        }
        self.form.reset(self.initial.clone());
        self.mutation.acknowledge();
        Ok(())
    }

    /// Validates and saves the current values.
    ///
    /// # Cancel safety
    /// Dropping the future before it completes settles the form without a
    /// saved snapshot, so values stay editable and the next edit, cancel or
    /// save starts from an idle state.
    pub async fn save(&mut self) -> SaveOutcome {
        let update = match self.form.submit() {
            Ok(update) => update,
            Err(blocked) => {
                debug!(reason = %blocked, "profile save blocked");
                return SaveOutcome::Blocked(blocked);
            }
        };
        let submitted = self.form.values().clone();
        let pending = PendingSave {
            form: &mut self.form,
            settled: false,
        };

        match self.mutation.mutate(&update).await {
            Ok(saved) => {
                info!("profile saved");
                pending.settle(Some(submitted.clone()));
                self.initial = submitted;
                self.events.notify(Notification::success(saved.message.clone()));
                self.events.refresh();
                SaveOutcome::Saved(saved.message)
            }
            Err(err) => {
                warn!(error = %err, "profile save failed");
                pending.settle(None);
                let message = err.user_message();
                self.events.notify(Notification::error(message.clone()));
                SaveOutcome::Failed(message)
            }
        }
    }

    #[must_use]
    pub fn view(&self) -> ProfileView {
        ProfileView::build(&self.form)
    }
}

/// Ends the form's pending phase when a save completes or is dropped.
struct PendingSave<'a> {
    form: &'a mut FormController,
    settled: bool,
}

impl PendingSave<'_> {
    fn settle(mut self, saved: Option<UserProfile>) {
        self.form.settle(saved);
        self.settled = true;
    }
}

impl Drop for PendingSave<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!("profile save abandoned");
            self.form.settle(None);
        }
    }
}
