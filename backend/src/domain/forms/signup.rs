//! Signup form.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{FieldErrors, RuleCode, rules};
use crate::domain::{FIRST_NAME_MAX, LAST_NAME_MAX, Registration, Username};

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Raw signup submission. The password is never serialised back into a view.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub image_url: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SignupForm {
    /// Check every field and build a [`Registration`].
    ///
    /// The password is kept exactly as typed.
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = rules::required(&mut errors, "username", &self.username)
            .and_then(|raw| Username::new(raw).ok());
        let first_name = rules::required(&mut errors, "first_name", &self.first_name)
            .filter(|value| rules::max_length(&mut errors, "first_name", value, FIRST_NAME_MAX));
        let last_name = rules::required(&mut errors, "last_name", &self.last_name)
            .filter(|value| rules::max_length(&mut errors, "last_name", value, LAST_NAME_MAX));
        let description = rules::optional(&self.description);
        let email = rules::required_email(&mut errors, "email", &self.email);
        let password = rules::required_secret(&mut errors, "password", &self.password)
            .map(Zeroizing::new)
            .filter(|value| rules::min_length(&mut errors, "password", value, PASSWORD_MIN_LENGTH));
        let image_url = rules::optional_url(&mut errors, "image_url", &self.image_url);

        match (username, first_name, last_name, email, password) {
            (Some(username), Some(first_name), Some(last_name), Some(email), Some(password))
                if errors.is_empty() =>
            {
                Ok(Registration {
                    username,
                    email: Some(email),
                    first_name,
                    last_name,
                    description,
                    password,
                    image_url,
                })
            }
            _ => Err(errors),
        }
    }

    /// Error shown when the username is already taken.
    pub fn duplicate_username() -> FieldErrors {
        FieldErrors::single("username", RuleCode::Duplicate, "Username already taken")
    }
}
