//! Authentication primitives: login credentials, registration input and
//! password hashing.
//!
//! Passwords only ever exist as [`Zeroizing`] strings and are hashed with
//! Argon2id using the library's fixed default cost parameters. Callers cannot
//! tune the cost.

use std::fmt;
use std::sync::OnceLock;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

use super::{Error, HashedPassword, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the authentication service.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "secret1").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "secret1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = Username::new(username).map_err(|_| LoginValidationError::EmptyUsername)?;

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for user lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated signup input handed to [`AuthService::register`].
///
/// [`AuthService::register`]: crate::domain::AuthService::register
#[derive(Clone)]
pub struct Registration {
    /// Validated username; uniqueness is checked on signup.
    pub username: Username,
    /// Contact address; `None` when left blank.
    pub email: Option<String>,
    /// Given and family name, both required.
    pub first_name: String,
    pub last_name: String,
    /// Free-text bio.
    pub description: Option<String>,
    /// Plaintext password, wiped on drop. Never stored.
    pub password: Zeroizing<String>,
    /// Profile picture; `None` selects the placeholder.
    pub image_url: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Salted Argon2id password hashing with fixed parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<HashedPassword, Error> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| HashedPassword::from_encoded(hash.to_string()))
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// Comparison happens inside the hash library. A malformed stored hash is
    /// reported as a mismatch rather than an error so callers keep a single
    /// failure path.
    pub fn verify(&self, password: &str, hash: &HashedPassword) -> bool {
        match PasswordHash::new(hash.as_encoded()) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                tracing::warn!(error = %err, "stored password hash is malformed");
                false
            }
        }
    }

    /// Burn one verification against a throwaway hash.
    ///
    /// Used when the username is unknown so that path costs about as much as
    /// a wrong password.
    pub fn verify_dummy(&self, password: &str) {
        static DUMMY: OnceLock<Option<HashedPassword>> = OnceLock::new();
        let dummy = DUMMY.get_or_init(|| self.hash("dummy-password-for-timing").ok());
        if let Some(hash) = dummy {
            let _ = self.verify(password, hash);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn credentials_debug_is_redacted() {
        let creds = LoginCredentials::try_from_parts("alice", "secret1").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret1"));
    }

    #[test]
    fn hash_is_salted_and_verifiable() {
        let hasher = PasswordHasher;
        let first = hasher.hash("secret1").expect("hash");
        let second = hasher.hash("secret1").expect("hash");

        assert_ne!(first.as_encoded(), "secret1");
        assert!(first.as_encoded().starts_with("$argon2id$"));
        assert_ne!(first, second, "salts must differ");
        assert!(hasher.verify("secret1", &first));
        assert!(!hasher.verify("wrong", &first));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let hasher = PasswordHasher;
        assert!(!hasher.verify("secret1", &HashedPassword::from_encoded("secret1")));
    }
}
