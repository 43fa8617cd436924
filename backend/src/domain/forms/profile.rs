//! Profile edit form.

use serde::{Deserialize, Serialize};

use super::{FieldErrors, rules};
use crate::domain::{DEFAULT_USER_IMAGE_URL, FIRST_NAME_MAX, LAST_NAME_MAX, ProfileUpdate, User};

/// Raw profile edit submission. The username and password are not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEditForm {
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    pub email: String,
    pub image_url: String,
}

impl ProfileEditForm {
    /// Seed the form from the current user record.
    pub fn from_user(user: &User) -> Self {
        let image_url = if user.image_url == DEFAULT_USER_IMAGE_URL {
            String::new()
        } else {
            user.image_url.clone()
        };
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            description: user.description.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            image_url,
        }
    }

    /// Validate into a full replacement of the editable profile fields.
    pub fn validate(&self) -> Result<ProfileUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();

        let first_name = rules::required(&mut errors, "first_name", &self.first_name)
            .filter(|value| rules::max_length(&mut errors, "first_name", value, FIRST_NAME_MAX));
        let last_name = rules::required(&mut errors, "last_name", &self.last_name)
            .filter(|value| rules::max_length(&mut errors, "last_name", value, LAST_NAME_MAX));
        let description = rules::optional(&self.description);
        let email = rules::required_email(&mut errors, "email", &self.email);
        let image_url = rules::optional_url(&mut errors, "image_url", &self.image_url);

        match (first_name, last_name, email) {
            (Some(first_name), Some(last_name), Some(email)) if errors.is_empty() => {
                Ok(ProfileUpdate {
                    first_name,
                    last_name,
                    description,
                    email: Some(email),
                    image_url: image_url.unwrap_or_else(|| DEFAULT_USER_IMAGE_URL.to_owned()),
                })
            }
            _ => Err(errors),
        }
    }
}
