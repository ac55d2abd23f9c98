//! Form payloads and their validation.
//!
//! Login and registration use explicit rule chains (see [`rules`]) because
//! only the first failing rule per field may be reported. The task form has
//! one rule per field and uses `#[derive(Validate)]`.
//!
//! All forms report problems as `validator::ValidationErrors`, one error per
//! field, which the views render next to the offending input.

pub mod rules;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::db::DbPool;
use crate::error::AppError;
use crate::models::user;
use rules::{check, error, Rule};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Message recorded when the honeypot field was filled in. It names no field.
pub const HONEYPOT_MESSAGE: &str = "The form could not be submitted";

/// Returns the message of the first error recorded for `field`.
pub fn first_error(errors: &ValidationErrors, field: &str) -> Option<String> {
    errors
        .field_errors()
        .get(field)
        .and_then(|list| list.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
}

fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Represents the payload of the login form.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check(
            &mut errors,
            "username",
            &self.username,
            &[
                Rule::Required("Enter your username"),
                Rule::Length {
                    min: 4,
                    max: 50,
                    message: "Username must be between 4 and 50 characters",
                },
            ],
        );
        check(
            &mut errors,
            "password",
            &self.password,
            &[
                Rule::Required("Enter a password"),
                Rule::Length {
                    min: 4,
                    max: 50,
                    message: "Password must be between 4 and 50 characters",
                },
            ],
        );
        into_result(errors)
    }
}

/// Represents the payload of the registration form.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    /// Hidden in the rendered form; people leave it empty, bots do not.
    #[serde(default)]
    pub honeypot: String,
}

impl RegisterForm {
    /// Static rules only; no database access.
    pub fn validate_fields(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        check(
            &mut errors,
            "username",
            &self.username,
            &[
                Rule::Required("Enter a username"),
                Rule::Length {
                    min: 4,
                    max: 50,
                    message: "Username must be between 4 and 50 characters",
                },
                Rule::Pattern(
                    &*USERNAME_REGEX,
                    "Username may only contain letters, digits, underscores or hyphens",
                ),
            ],
        );
        check(
            &mut errors,
            "email",
            &self.email,
            &[
                Rule::Required("Enter an email address"),
                Rule::Length {
                    min: 6,
                    max: 100,
                    message: "Email must be between 6 and 100 characters",
                },
                Rule::Email("Enter a valid email address"),
            ],
        );
        check(
            &mut errors,
            "password",
            &self.password,
            &[
                Rule::Required("Enter a password"),
                Rule::Length {
                    min: 4,
                    max: 50,
                    message: "Password must be between 4 and 50 characters",
                },
            ],
        );
        check(
            &mut errors,
            "confirm_password",
            &self.confirm_password,
            &[
                Rule::Required("Confirm your password"),
                Rule::EqualTo(&self.password, "Passwords must match"),
            ],
        );
        check(
            &mut errors,
            "honeypot",
            &self.honeypot,
            &[Rule::Empty(HONEYPOT_MESSAGE)],
        );
        errors
    }

    /// Runs the static rules, then the uniqueness checks against the store
    /// for the fields that passed them.
    pub async fn validate(&self, pool: &DbPool) -> Result<Result<(), ValidationErrors>, AppError> {
        let mut errors = self.validate_fields();
        let failed = errors.field_errors();
        let username_ok = !failed.contains_key("username");
        let email_ok = !failed.contains_key("email");

        if username_ok && user::get_by_username(pool, &self.username).await?.is_some() {
            errors.add("username", error("unique", "That username is already taken"));
        }
        if email_ok && user::get_by_email(pool, &self.email).await?.is_some() {
            errors.add("email", error("unique", "That email is already registered"));
        }

        Ok(into_result(errors))
    }

    /// True when the honeypot field tripped.
    pub fn is_bot(errors: &ValidationErrors) -> bool {
        errors.field_errors().contains_key("honeypot")
    }
}

/// Input for creating or editing a task.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskForm {
    /// Must be between 1 and 50 characters.
    #[validate(length(min = 1, max = 50, message = "Enter a title of at most 50 characters"))]
    #[serde(default)]
    pub title: String,

    /// Optional, at most 1000 characters.
    #[validate(length(max = 1000, message = "Description must be at most 1000 characters"))]
    #[serde(default)]
    pub description: String,
}

impl TaskForm {
    /// Trims surrounding whitespace before validation, so a blank title fails.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}
