//! Field rules shared by the forms.
//!
//! Every rule records its own failure into the [`FieldErrors`] map and returns
//! the cleaned value when it passes, so a form can run all of its rules and
//! report every failing field at once.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{FieldErrors, RuleCode};

const REQUIRED_MESSAGE: &str = "This field is required.";

/// One `@`, no whitespace, and a dot somewhere in the domain part.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// `None` only if the pattern fails to compile, in which case every address
/// is rejected.
static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// Trimmed value, or a `required` failure when blank.
pub(super) fn required(errors: &mut FieldErrors, field: &'static str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(field, RuleCode::Required, REQUIRED_MESSAGE);
        None
    } else {
        Some(value.to_owned())
    }
}

/// Trimmed value, or `None` when blank. Never fails.
pub(super) fn optional(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Raw value (untrimmed), or a `required` failure when empty.
pub(super) fn required_secret(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
) -> Option<String> {
    if raw.is_empty() {
        errors.push(field, RuleCode::Required, REQUIRED_MESSAGE);
        None
    } else {
        Some(raw.to_owned())
    }
}

/// Check the value against an absolute `http`/`https` URL with a host.
pub(super) fn url(errors: &mut FieldErrors, field: &'static str, value: &str) -> bool {
    let valid = Url::parse(value)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some())
        .unwrap_or(false);
    if !valid {
        errors.push(field, RuleCode::InvalidUrl, "Invalid URL.");
    }
    valid
}

/// Optional URL: blank passes as `None`, anything else must be a URL.
pub(super) fn optional_url(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
) -> Option<String> {
    let value = optional(raw)?;
    url(errors, field, &value).then_some(value)
}

/// Required, syntactically valid email address.
pub(super) fn required_email(
    errors: &mut FieldErrors,
    field: &'static str,
    raw: &str,
) -> Option<String> {
    let value = required(errors, field, raw)?;
    if EMAIL_RE.as_ref().is_some_and(|re| re.is_match(&value)) {
        Some(value)
    } else {
        errors.push(field, RuleCode::InvalidEmail, "Invalid email address.");
        None
    }
}

/// Fail when `value` has fewer than `min` characters.
pub(super) fn min_length(errors: &mut FieldErrors, field: &'static str, value: &str, min: usize) -> bool {
    let ok = value.chars().count() >= min;
    if !ok {
        errors.push(
            field,
            RuleCode::TooShort,
            format!("Field must be at least {min} characters long."),
        );
    }
    ok
}

/// Fail when `value` has more than `max` characters.
pub(super) fn max_length(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) -> bool {
    let ok = value.chars().count() <= max;
    if !ok {
        errors.push(
            field,
            RuleCode::TooLong,
            format!("Field cannot be longer than {max} characters."),
        );
    }
    ok
}
