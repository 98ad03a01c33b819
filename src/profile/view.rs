//! View model of the profile form. It is rebuilt from form state on every
//! render and rendered as text by the CLI. Rendered values come from the user's
//! own profile; nothing here may include tokens.

use crate::profile::{
    form::FormController,
    types::{FieldValue, ProfileField},
};
use std::fmt;

pub const TITLE: &str = "Profile details";
pub const DESCRIPTION: &str =
    "Manage your personal information. Fields marked with * are required.";
pub const PREFERENCES_HEADING: &str = "Preferences";
pub const SAVE_LABEL: &str = "Save changes";
pub const SAVING_LABEL: &str = "Saving...";
pub const CANCEL_LABEL: &str = "Cancel";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRow {
    pub field: ProfileField,
    pub label: String,
    pub value: FieldValue,
    pub placeholder: Option<&'static str>,
    pub description: Option<&'static str>,
    pub read_only: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileView {
    pub rows: Vec<FieldRow>,
    pub save: ButtonView,
    pub cancel: ButtonView,
}

impl ProfileView {
    #[must_use]
    pub fn build(form: &FormController) -> Self {
        let pending = form.is_pending();
        let rows = ProfileField::ALL
            .into_iter()
            .map(|field| FieldRow {
                field,
                label: label(field),
                value: form.values().value(field),
                placeholder: placeholder(field),
                description: description(field),
                read_only: field.is_read_only(),
                error: form.errors().get(field).map(str::to_string),
            })
            .collect();

        Self {
            rows,
            save: ButtonView {
                label: if pending { SAVING_LABEL } else { SAVE_LABEL },
                disabled: pending || !form.is_dirty(),
            },
            cancel: ButtonView {
                label: CANCEL_LABEL,
                disabled: pending,
            },
        }
    }

    #[must_use]
    pub fn row(&self, field: ProfileField) -> Option<&FieldRow> {
        self.rows.iter().find(|row| row.field == field)
    }
}

fn label(field: ProfileField) -> String {
    let base = match field {
        ProfileField::FullName => "Full name",
        ProfileField::Email => "Email",
        ProfileField::PhoneNumber => "Phone number",
        ProfileField::Bio => "Bio",
        ProfileField::Website => "Website",
        ProfileField::Newsletter => "Newsletter",
        ProfileField::Marketing => "Marketing emails",
    };
    if field.is_required() {
        format!("{base} *")
    } else {
        base.to_string()
    }
}

const fn placeholder(field: ProfileField) -> Option<&'static str> {
    match field {
        ProfileField::FullName => Some("Your full name"),
        ProfileField::Email => Some("Your email"),
        ProfileField::PhoneNumber => Some("Your phone number"),
        ProfileField::Bio => Some("Tell us a little about yourself"),
        ProfileField::Website => Some("https://your-website.com"),
        ProfileField::Newsletter | ProfileField::Marketing => None,
    }
}

const fn description(field: ProfileField) -> Option<&'static str> {
    match field {
        ProfileField::Email => Some("Your email address cannot be changed."),
        ProfileField::Newsletter => Some("Receive updates about new features and content."),
        ProfileField::Marketing => Some("Receive promotional emails and offers."),
        _ => None,
    }
}

impl fmt::Display for ProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{DESCRIPTION}")?;
        writeln!(f)?;

        let mut in_preferences = false;
        for row in &self.rows {
            if row.field.is_flag() {
                if !in_preferences {
                    writeln!(f)?;
                    writeln!(f, "{PREFERENCES_HEADING}")?;
                    in_preferences = true;
                }
                let mark = if row.value == FieldValue::Flag(true) { "x" } else { " " };
                write!(f, "[{mark}] {}", row.label)?;
                if let Some(description) = row.description {
                    write!(f, " - {description}")?;
                }
                writeln!(f)?;
                continue;
            }

            let value = match &row.value {
                FieldValue::Text(text) if text.is_empty() => {
                    format!("({})", row.placeholder.unwrap_or(""))
                }
                value => value.to_string(),
            };
            let read_only = if row.read_only { " (read-only)" } else { "" };
            writeln!(f, "{}{read_only}: {value}", row.label)?;
            if let Some(description) = row.description {
                writeln!(f, "    {description}")?;
            }
            if let Some(error) = &row.error {
                writeln!(f, "    ! {error}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", render_button(&self.save))?;
        write!(f, " {}", render_button(&self.cancel))
    }
}

fn render_button(button: &ButtonView) -> String {
    if button.disabled {
        format!("[{}] (disabled)", button.label)
    } else {
        format!("[{}]", button.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::types::{Preferences, UserProfile};

    fn form() -> FormController {
        FormController::new(UserProfile {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@profilo.dev".to_string(),
            phone_number: "555".to_string(),
            bio: None,
            website: None,
            preferences: Preferences {
                newsletter: true,
                marketing: false,
            },
        })
    }

    #[test]
    fn clean_form_disables_save() {
        let view = ProfileView::build(&form());
        assert_eq!(
            view.save,
            ButtonView {
                label: SAVE_LABEL,
                disabled: true
            }
        );
        assert!(!view.cancel.disabled);
        assert_eq!(view.rows.len(), ProfileField::ALL.len());
    }

    #[test]
    fn pending_form_shows_saving_and_disables_both_buttons() {
        let mut form = form();
        form.set_field(ProfileField::Bio, FieldValue::Text("hi".to_string()))
            .unwrap();
        form.submit().unwrap();

        let view = ProfileView::build(&form);
        assert_eq!(view.save.label, SAVING_LABEL);
        assert!(view.save.disabled);
        assert!(view.cancel.disabled);
    }

    #[test]
    fn rows_carry_labels_and_inline_errors() {
        let mut form = form();
        form.set_field(ProfileField::Website, FieldValue::Text("nope".to_string()))
            .unwrap();
        let view = ProfileView::build(&form);

        let website = view.row(ProfileField::Website).unwrap();
        assert_eq!(
            website.error.as_deref(),
            Some("Website must be a valid URL (https://...).")
        );
        assert!(!view.save.disabled);

        let email = view.row(ProfileField::Email).unwrap();
        assert!(email.read_only);
        assert_eq!(
            email.description,
            Some("Your email address cannot be changed.")
        );
        assert_eq!(view.row(ProfileField::FullName).unwrap().label, "Full name *");
    }

    #[test]
    fn display_renders_sections_and_buttons() {
        let rendered = ProfileView::build(&form()).to_string();
        assert!(rendered.starts_with(TITLE));
        assert!(rendered.contains("Email (read-only): ada@profilo.dev"));
        assert!(rendered.contains("Bio: (Tell us a little about yourself)"));
        assert!(rendered.contains("[x] Newsletter"));
        assert!(rendered.contains("[ ] Marketing emails"));
        assert!(rendered.ends_with("[Save changes] (disabled) [Cancel]"));
    }
}
