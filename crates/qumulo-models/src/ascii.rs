//! Printable-ASCII validation for credential inputs.
//!
//! The appliance only accepts usernames and passwords made of printable
//! ASCII characters (space through `~`). Inputs are checked locally so a
//! bad value never reaches the network.

use crate::error::ModelError;

/// Return `value` unchanged if every character is printable ASCII.
///
/// `field` names the input in the error message (e.g. `"new password"`).
///
/// # Errors
///
/// Returns [`ModelError::NotPrintableAscii`] pointing at the first
/// character outside `' '..='~'`.
///
/// # Examples
///
/// ```
/// use qumulo_models::parse_ascii;
///
/// assert_eq!(parse_ascii("admin", "username").unwrap(), "admin");
/// assert!(parse_ascii("adm\u{e9}n", "username").is_err());
/// ```
pub fn parse_ascii<'a>(value: &'a str, field: &str) -> Result<&'a str, ModelError> {
    match value.chars().position(|c| !is_printable_ascii(c)) {
        None => Ok(value),
        Some(position) => Err(ModelError::NotPrintableAscii {
            field: field.to_string(),
            position,
        }),
    }
}

fn is_printable_ascii(c: char) -> bool {
    matches!(c, ' '..='~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_printable_range() {
        let all: String = (0x20u8..=0x7e).map(char::from).collect();
        assert_eq!(parse_ascii(&all, "password").unwrap(), all);
    }

    #[test]
    fn accepts_empty_string() {
        assert_eq!(parse_ascii("", "password").unwrap(), "");
    }

    #[test]
    fn rejects_non_ascii() {
        let err = parse_ascii("pässword", "password").unwrap_err();
        assert_eq!(
            err,
            ModelError::NotPrintableAscii {
                field: "password".into(),
                position: 1,
            }
        );
    }

    #[test]
    fn rejects_control_characters() {
        assert!(parse_ascii("line\nbreak", "username").is_err());
        assert!(parse_ascii("tab\there", "username").is_err());
        assert!(parse_ascii("del\u{7f}", "username").is_err());
    }

    #[test]
    fn error_does_not_echo_value() {
        let err = parse_ascii("s3cr\u{e9}t", "old password").unwrap_err();
        assert!(!err.to_string().contains("s3cr"));
        assert!(err.to_string().starts_with("old password"));
    }
}
