//! Profile record, request and response payloads for `/api/profile`.

use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default)]
    pub marketing: bool,
}

/// A user's profile as loaded from the data source and edited by the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl UserProfile {
    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: ProfileField) -> FieldValue {
        match field {
            ProfileField::FullName => FieldValue::Text(self.full_name.clone()),
            ProfileField::Email => FieldValue::Text(self.email.clone()),
            ProfileField::PhoneNumber => FieldValue::Text(self.phone_number.clone()),
            ProfileField::Bio => FieldValue::Text(self.bio.clone().unwrap_or_default()),
            ProfileField::Website => FieldValue::Text(self.website.clone().unwrap_or_default()),
            ProfileField::Newsletter => FieldValue::Flag(self.preferences.newsletter),
            ProfileField::Marketing => FieldValue::Flag(self.preferences.marketing),
        }
    }
}

/// Body of `PUT /api/profile`. It has no email field, so the address can never
/// be submitted for change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone_number: String,
    pub bio: Option<String>,
    pub website: Option<String>,
    pub preferences: Preferences,
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(profile: &UserProfile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            phone_number: profile.phone_number.clone(),
            bio: profile.bio.clone(),
            website: profile
                .website
                .as_deref()
                .map(str::trim)
                .filter(|website| !website.is_empty())
                .map(str::to_string),
            preferences: profile.preferences.clone(),
        }
    }
}

/// Success payload of `PUT /api/profile`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ProfileSaved {
    pub message: String,
}

/// Fields shown by the profile form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProfileField {
    FullName,
    Email,
    PhoneNumber,
    Bio,
    Website,
    Newsletter,
    Marketing,
}

impl ProfileField {
    pub const ALL: [Self; 7] = [
        Self::FullName,
        Self::Email,
        Self::PhoneNumber,
        Self::Bio,
        Self::Website,
        Self::Newsletter,
        Self::Marketing,
    ];

    /// Path of the field in the JSON payload.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::Bio => "bio",
            Self::Website => "website",
            Self::Newsletter => "preferences.newsletter",
            Self::Marketing => "preferences.marketing",
        }
    }

    /// Name used by `--set name=value`.
    #[must_use]
    pub const fn cli_name(self) -> &'static str {
        match self {
            Self::FullName => "full-name",
            Self::Email => "email",
            Self::PhoneNumber => "phone-number",
            Self::Bio => "bio",
            Self::Website => "website",
            Self::Newsletter => "newsletter",
            Self::Marketing => "marketing",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::FullName | Self::PhoneNumber)
    }

    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Email)
    }

    #[must_use]
    pub const fn is_flag(self) -> bool {
        matches!(self, Self::Newsletter | Self::Marketing)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.wire_name())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.cli_name() == value || field.wire_name() == value)
            .ok_or_else(|| format!("unknown profile field: {value}"))
    }
}

/// Editable value of a single field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Parses raw CLI input into the value kind `field` expects.
    ///
    /// # Errors
    /// Returns a message when a flag field gets something other than a boolean.
    pub fn parse_for(field: ProfileField, raw: &str) -> Result<Self, String> {
        if !field.is_flag() {
            return Ok(Self::Text(raw.to_string()));
        }

        match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Self::Flag(true)),
            "false" | "no" | "off" | "0" => Ok(Self::Flag(false)),
            other => Err(format!("{field} expects true or false, got '{other}'")),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => formatter.write_str(text),
            Self::Flag(true) => formatter.write_str("on"),
            Self::Flag(false) => formatter.write_str("off"),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}
