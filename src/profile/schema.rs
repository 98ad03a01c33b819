//! Validation rules for the profile form. Rules run per field on every change
//! and over the whole record before submit.

use crate::profile::types::{ProfileField, UserProfile};
use regex::Regex;
use std::{collections::BTreeMap, fmt};
use url::Url;

pub const MAX_FULL_NAME_CHARS: usize = 100;
pub const MAX_PHONE_NUMBER_CHARS: usize = 30;
pub const MAX_BIO_CHARS: usize = 500;

/// Field-indexed validation messages, ordered like the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ProfileField, String>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: ProfileField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: ProfileField) {
        self.0.remove(&field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: ProfileField) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates the whole record.
///
/// # Errors
/// Returns every failing field with its message.
pub fn validate(profile: &UserProfile) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for field in ProfileField::ALL {
        if let Some(message) = validate_field(profile, field) {
            errors.insert(field, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a single field and returns its message when it fails.
#[must_use]
pub fn validate_field(profile: &UserProfile, field: ProfileField) -> Option<String> {
    match field {
        ProfileField::FullName => full_name(&profile.full_name),
        ProfileField::PhoneNumber => phone_number(&profile.phone_number),
        ProfileField::Bio => profile.bio.as_deref().and_then(bio),
        ProfileField::Website => profile.website.as_deref().and_then(website),
        // read-only or free booleans
        ProfileField::Email | ProfileField::Newsletter | ProfileField::Marketing => None,
    }
}

fn full_name(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Full name is required.".to_string())
    } else if value.chars().count() > MAX_FULL_NAME_CHARS {
        Some(format!(
            "Full name must be at most {MAX_FULL_NAME_CHARS} characters."
        ))
    } else {
        None
    }
}

fn phone_number(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Phone number is required.".to_string())
    } else if value.chars().count() > MAX_PHONE_NUMBER_CHARS {
        Some(format!(
            "Phone number must be at most {MAX_PHONE_NUMBER_CHARS} characters."
        ))
    } else if !valid_phone_chars(value) {
        Some("Phone number may only contain digits, spaces and + - . ( ).".to_string())
    } else {
        None
    }
}

fn bio(value: &str) -> Option<String> {
    (value.chars().count() > MAX_BIO_CHARS)
        .then(|| format!("Bio must be at most {MAX_BIO_CHARS} characters."))
}

fn website(value: &str) -> Option<String> {
    (!valid_website(value.trim()))
        .then(|| "Website must be a valid URL (https://...).".to_string())
}

fn valid_phone_chars(value: &str) -> bool {
    Regex::new(r"^[0-9+\-.() ]+$").is_ok_and(|re| re.is_match(value))
}

fn valid_website(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}
