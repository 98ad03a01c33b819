use crate::profile::{FieldValue, ProfileField};
use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const CMD_PROFILE: &str = "profile";
pub const CMD_SHOW: &str = "show";
pub const CMD_UPDATE: &str = "update";

pub const ARG_FILE: &str = "file";
pub const ARG_SET: &str = "set";
pub const ARG_CANCEL: &str = "cancel";

/// Parses `field=value` into a typed edit.
#[must_use]
pub fn validator_field_edit() -> ValueParser {
    ValueParser::from(
        move |raw: &str| -> std::result::Result<(ProfileField, FieldValue), String> {
            let (name, value) = raw
                .split_once('=')
                .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
            let field: ProfileField = name.trim().parse()?;
            let value = FieldValue::parse_for(field, value)?;
            Ok((field, value))
        },
    )
}

fn file_arg() -> Arg {
    Arg::new(ARG_FILE)
        .short('f')
        .long(ARG_FILE)
        .help("JSON file holding the current profile")
        .env("PROFILO_PROFILE_FILE")
        .required(true)
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new(CMD_PROFILE)
        .about("Show or edit the profile")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_SHOW)
                .about("Render the profile form")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new(CMD_UPDATE)
                .about("Edit fields and save the profile")
                .arg(file_arg())
                .arg(
                    Arg::new(ARG_SET)
                        .short('s')
                        .long(ARG_SET)
                        .help("Field edit, e.g. --set bio=\"Hello\" or --set newsletter=true")
                        .value_name("FIELD=VALUE")
                        .action(ArgAction::Append)
                        .value_parser(validator_field_edit()),
                )
                .arg(
                    Arg::new(ARG_CANCEL)
                        .long(ARG_CANCEL)
                        .help("Discard the edits instead of saving")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_and_flag_edits() {
        let matches = subcommand()
            .try_get_matches_from(vec![
                "profile",
                "update",
                "--file",
                "me.json",
                "--set",
                "bio=Hello there",
                "--set",
                "newsletter=yes",
            ])
            .unwrap();
        let (_, update) = matches.subcommand().unwrap();
        let edits: Vec<_> = update
            .get_many::<(ProfileField, FieldValue)>(ARG_SET)
            .unwrap()
            .cloned()
            .collect();

        assert_eq!(
            edits,
            vec![
                (ProfileField::Bio, FieldValue::Text("Hello there".to_string())),
                (ProfileField::Newsletter, FieldValue::Flag(true)),
            ]
        );
    }

    #[test]
    fn rejects_unknown_fields_and_bad_flags() {
        for edit in ["nickname=x", "marketing=maybe", "bio"] {
            let result = subcommand().try_get_matches_from(vec![
                "profile", "update", "--file", "me.json", "--set", edit,
            ]);
            assert!(result.is_err(), "{edit} should be rejected");
        }
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let matches = subcommand()
            .try_get_matches_from(vec![
                "profile",
                "update",
                "--file",
                "me.json",
                "--set",
                "website=https://example.com/?a=b",
            ])
            .unwrap();
        let (_, update) = matches.subcommand().unwrap();
        let edit = update
            .get_one::<(ProfileField, FieldValue)>(ARG_SET)
            .unwrap();
        assert_eq!(
            edit.1,
            FieldValue::Text("https://example.com/?a=b".to_string())
        );
    }
}
