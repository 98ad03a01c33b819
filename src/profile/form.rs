//! Form state for the profile editor: current values, the baseline snapshot
//! used to derive dirtiness, inline errors and the in-flight submit guard.

use crate::profile::{
    schema::{self, ValidationErrors},
    types::{FieldValue, ProfileField, ProfileUpdate, UserProfile},
};
use thiserror::Error;

/// Why an edit was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is read-only")]
    ReadOnly(ProfileField),
    #[error("{0} does not accept this kind of value")]
    TypeMismatch(ProfileField),
    #[error("a save is in progress")]
    Pending,
}

/// Why a submit did not reach the network.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    #[error("a save is already in progress")]
    Pending,
    #[error("there are no changes to save")]
    NotDirty,
    #[error("the form has invalid fields: {0}")]
    Invalid(ValidationErrors),
}

#[derive(Clone, Debug)]
pub struct FormController {
    values: UserProfile,
    baseline: UserProfile,
    errors: ValidationErrors,
    pending: bool,
}

impl FormController {
    #[must_use]
    pub fn new(snapshot: UserProfile) -> Self {
        Self {
            values: snapshot.clone(),
            baseline: snapshot,
            errors: ValidationErrors::new(),
            pending: false,
        }
    }

    #[must_use]
    pub const fn values(&self) -> &UserProfile {
        &self.values
    }

    #[must_use]
    pub const fn baseline(&self) -> &UserProfile {
        &self.baseline
    }

    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.values != self.baseline
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Updates one field and re-validates only that field.
    ///
    /// # Errors
    /// Refuses edits to the email, values of the wrong kind, and edits while a
    /// save is pending.
    pub fn set_field(&mut self, field: ProfileField, value: FieldValue) -> Result<(), FormError> {
        if self.pending {
            return Err(FormError::Pending);
        }

        match (field, value) {
            (ProfileField::Email, _) => return Err(FormError::ReadOnly(field)),
            (ProfileField::FullName, FieldValue::Text(text)) => self.values.full_name = text,
            (ProfileField::PhoneNumber, FieldValue::Text(text)) => {
                self.values.phone_number = text;
            }
            (ProfileField::Bio, FieldValue::Text(text)) => self.values.bio = optional_text(text),
            (ProfileField::Website, FieldValue::Text(text)) => {
                self.values.website = optional_text(text.trim().to_string());
            }
            (ProfileField::Newsletter, FieldValue::Flag(flag)) => {
                self.values.preferences.newsletter = flag;
            }
            (ProfileField::Marketing, FieldValue::Flag(flag)) => {
                self.values.preferences.marketing = flag;
            }
            (field, _) => return Err(FormError::TypeMismatch(field)),
        }

        match schema::validate_field(&self.values, field) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(field),
        }

        Ok(())
    }

    /// Replaces all values and the baseline with `snapshot`.
    pub fn reset(&mut self, snapshot: UserProfile) {
        self.values = snapshot.clone();
        self.baseline = snapshot;
        self.errors.clear();
    }

    /// Gates a submit: nothing in flight, everything valid, something changed.
    /// Validation runs first so an untouched but invalid snapshot still shows
    /// its errors. On success the form is marked pending until [`Self::settle`].
    ///
    /// # Errors
    /// Returns the reason the submit was blocked; validation errors are also
    /// stored per field.
    pub fn submit(&mut self) -> Result<ProfileUpdate, SubmitBlocked> {
        if self.pending {
            return Err(SubmitBlocked::Pending);
        }

        if let Err(errors) = schema::validate(&self.values) {
            self.errors = errors.clone();
            return Err(SubmitBlocked::Invalid(errors));
        }
        self.errors.clear();

        if !self.is_dirty() {
            return Err(SubmitBlocked::NotDirty);
        }

        self.pending = true;
        Ok(ProfileUpdate::from(&self.values))
    }

    /// Ends the pending phase. `Some(saved)` makes the saved snapshot the new
    /// baseline; `None` leaves values and baseline untouched for a retry.
    pub fn settle(&mut self, saved: Option<UserProfile>) {
        self.pending = false;
        if let Some(saved) = saved {
            self.baseline = saved;
        }
    }
}

fn optional_text(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
