//! Input schemas for the four HTML forms.
//!
//! Each form is a plain `serde` struct of raw strings as submitted. Calling
//! `validate` either yields the typed domain value the handler persists, or a
//! [`FieldErrors`] map the handler renders next to the form. Validation never
//! touches storage; anything it needs from the database (the city choices) is
//! passed in by the caller at validation time.

mod cafe;
mod login;
mod profile;
mod rules;
mod signup;

use std::collections::BTreeMap;

use serde::Serialize;

pub use cafe::{CafeForm, CityChoice, CityChoices};
pub use login::LoginForm;
pub use profile::ProfileEditForm;
pub use signup::{PASSWORD_MIN_LENGTH, SignupForm};

/// Key used for errors that belong to the whole form rather than a field.
pub const FORM_ERROR_KEY: &str = "form";

/// Stable identifiers for failed validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    /// Blank or whitespace-only input.
    Required,
    /// Not an absolute http(s) URL.
    InvalidUrl,
    /// Not shaped like an email address.
    InvalidEmail,
    /// Below the minimum length.
    TooShort,
    /// Above the maximum length.
    TooLong,
    /// Not one of the offered choices.
    InvalidChoice,
    /// Already taken by another record.
    Duplicate,
    /// Login failed; only used under the form-level key.
    InvalidCredentials,
}

/// A single failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Which rule failed.
    pub code: RuleCode,
    /// Message shown next to the field.
    pub message: String,
}

/// Field-level validation failures keyed by field name.
///
/// Serialises as `{ "field": [{ "code": ..., "message": ... }] }` with fields
/// in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<FieldError>>);

impl FieldErrors {
    /// Empty map: nothing failed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: &'static str, code: RuleCode, message: impl Into<String>) {
        self.0.entry(field).or_default().push(FieldError {
            code,
            message: message.into(),
        });
    }

    /// Single-error map, handy for failures found after validation such as a
    /// duplicate username.
    pub fn single(field: &'static str, code: RuleCode, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, code, message);
        errors
    }

    /// True when every rule passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failures recorded for `field`, empty when it passed.
    pub fn field(&self, field: &str) -> &[FieldError] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `field` failed with `code`.
    pub fn has(&self, field: &str, code: RuleCode) -> bool {
        self.field(field).iter().any(|error| error.code == code)
    }

    /// Names of the fields that failed.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(value)` when no failures were recorded.
    pub(crate) fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}
