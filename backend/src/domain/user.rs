//! User data model.
//!
//! A [`User`] is a stored account. [`NewUser`] is the unsaved record produced
//! by registration, already carrying a hashed password. [`ProfileUpdate`] holds
//! the fields a user may change after signup.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Image shown for users who did not supply a profile picture.
pub const DEFAULT_USER_IMAGE_URL: &str = "/static/images/default-pic.png";
/// Maximum number of characters in a first name.
pub const FIRST_NAME_MAX: usize = 30;
/// Maximum number of characters in a last name.
pub const LAST_NAME_MAX: usize = 40;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Database-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique, case-sensitive login name.
///
/// Surrounding whitespace is trimmed so signup and login agree on the stored
/// value; inner characters and case are preserved.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Encoded password hash (PHC string format).
///
/// The value is opaque to everything except the password hasher. `Debug`
/// output is redacted and the type never serialises.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an already encoded hash, e.g. one read back from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded hash string.
    pub fn as_encoded(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// Fields a user can change through the profile editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub image_url: String,
}

/// An unsaved user produced by registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub image_url: String,
    pub admin: bool,
    pub password_hash: HashedPassword,
}

/// A stored user account.
///
/// The password hash is carried for credential checks but is skipped when the
/// record is serialised into a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub admin: bool,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub description: Option<String>,
    pub image_url: String,
    #[serde(skip_serializing)]
    pub password_hash: HashedPassword,
}

impl User {
    /// Attach a stored id to a freshly registered user.
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            username,
            email,
            first_name,
            last_name,
            description,
            image_url,
            admin,
            password_hash,
        } = new_user;
        Self {
            id,
            username,
            admin,
            email,
            first_name,
            last_name,
            description,
            image_url,
            password_hash,
        }
    }

    /// Return `"{first_name} {last_name}"`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{HashedPassword, User, UserId, Username};
    ///
    /// let user = User {
    ///     id: UserId::new(1),
    ///     username: Username::new("alice").expect("username"),
    ///     admin: false,
    ///     email: None,
    ///     first_name: "Alice".into(),
    ///     last_name: "Adams".into(),
    ///     description: None,
    ///     image_url: "/static/images/default-pic.png".into(),
    ///     password_hash: HashedPassword::from_encoded("$argon2id$..."),
    /// };
    /// assert_eq!(user.full_name(), "Alice Adams");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Replace every editable profile field.
    pub fn apply_profile(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            description,
            email,
            image_url,
        } = update;
        self.first_name = first_name;
        self.last_name = last_name;
        self.description = description;
        self.email = email;
        self.image_url = image_url;
    }

    /// The editable profile fields of this user.
    pub fn profile(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            description: self.description.clone(),
            email: self.email.clone(),
            image_url: self.image_url.clone(),
        }
    }
}
