//! Login form.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{FORM_ERROR_KEY, FieldErrors, RuleCode, rules};
use crate::domain::LoginCredentials;

/// Raw login submission.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl LoginForm {
    /// Require both fields. Whether they match is the auth service's job.
    pub fn validate(&self) -> Result<LoginCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = rules::required(&mut errors, "username", &self.username);
        let password = rules::required_secret(&mut errors, "password", &self.password);

        match (username, password) {
            (Some(username), Some(password)) => LoginCredentials::try_from_parts(&username, &password)
                .map_err(|_| Self::invalid_credentials()),
            _ => Err(errors),
        }
    }

    /// The single message shown for any failed credential check.
    pub fn invalid_credentials() -> FieldErrors {
        FieldErrors::single(FORM_ERROR_KEY, RuleCode::InvalidCredentials, "Invalid credentials.")
    }
}
