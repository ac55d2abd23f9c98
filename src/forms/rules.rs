//! Per-field rule chains.
//!
//! A field is checked against its rules in order and the first failure is
//! recorded; later rules on the same field are skipped. Other fields are
//! unaffected.

use std::borrow::Cow;

use regex::Regex;
use validator::{validate_email, validate_length, ValidationError, ValidationErrors};

pub enum Rule<'a> {
    /// The value must contain something besides whitespace.
    Required(&'static str),
    /// Character count must lie within `min..=max`.
    Length {
        min: u64,
        max: u64,
        message: &'static str,
    },
    Email(&'static str),
    Pattern(&'a Regex, &'static str),
    /// The value must equal another field's value.
    EqualTo(&'a str, &'static str),
    /// The value must be empty.
    Empty(&'static str),
}

impl Rule<'_> {
    fn code(&self) -> &'static str {
        match self {
            Rule::Required(_) => "required",
            Rule::Length { .. } => "length",
            Rule::Email(_) => "email",
            Rule::Pattern(..) => "regex",
            Rule::EqualTo(..) => "must_match",
            Rule::Empty(_) => "empty",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Rule::Required(message)
            | Rule::Length { message, .. }
            | Rule::Email(message)
            | Rule::Pattern(_, message)
            | Rule::EqualTo(_, message)
            | Rule::Empty(message) => message,
        }
    }

    fn passes(&self, value: &str) -> bool {
        match self {
            Rule::Required(_) => !value.trim().is_empty(),
            Rule::Length { min, max, .. } => validate_length(value, Some(*min), Some(*max), None),
            Rule::Email(_) => validate_email(value),
            Rule::Pattern(regex, _) => regex.is_match(value),
            Rule::EqualTo(other, _) => value == *other,
            Rule::Empty(_) => value.is_empty(),
        }
    }
}

/// Builds a `ValidationError` carrying a display message.
pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Runs `rules` against `value`, recording the first failure under `field`.
///
/// Returns `true` when every rule passed.
pub fn check(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    rules: &[Rule<'_>],
) -> bool {
    match rules.iter().find(|rule| !rule.passes(value)) {
        Some(rule) => {
            errors.add(field, error(rule.code(), rule.message()));
            false
        }
        None => true,
    }
}
