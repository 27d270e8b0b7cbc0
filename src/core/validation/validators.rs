//! Reusable field validators
//!
//! Each validator checks one raw draft value and either returns the parsed
//! value or the user-facing message. The rule table in [`super::rules`]
//! composes them; nothing else should produce field messages.

use crate::core::draft::{Choice, Measure};
use validator::ValidateEmail;

/// Validator: text is present and non-empty
pub fn required<'a>(label: &str, value: Option<&'a str>) -> Result<&'a str, String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(format!("{} is required", label)),
    }
}

/// Validator: text is present and one of the choices
pub fn one_of<C: Choice>(label: &str, value: Option<&str>) -> Result<C, String> {
    let text = required(label, value)?;
    C::parse(text).ok_or_else(|| format!("{} must be one of: {}", label, C::allowed()))
}

/// Validator: boolean answer was given (`false` counts)
pub fn answered(label: &str, value: Option<bool>) -> Result<bool, String> {
    value.ok_or_else(|| format!("{} is required", label))
}

/// Validator: measure is present and a positive number
pub fn positive_measure<'a>(
    label: &str,
    value: Option<&'a Measure>,
) -> Result<&'a Measure, String> {
    match value {
        Some(measure) if !measure.is_blank() => {
            if measure.as_positive().is_some() {
                Ok(measure)
            } else {
                Err(format!("{} must be a positive number", label))
            }
        }
        _ => Err(format!("{} is required", label)),
    }
}

/// Validator: text is present and a syntactically valid email address
///
/// Syntax is delegated to `validator`; the domain must also contain a dot,
/// so `user@localhost` is rejected.
pub fn email_address<'a>(label: &str, value: Option<&'a str>) -> Result<&'a str, String> {
    let text = required(label, value)?;
    let dotted_domain = text
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));

    if text.validate_email() && dotted_domain {
        Ok(text)
    } else {
        Err("Invalid email format".to_string())
    }
}
