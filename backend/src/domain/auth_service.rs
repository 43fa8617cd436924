//! Account registration, credential checks and identity resolution.
//!
//! Session binding (`login`/`logout`) belongs to the inbound adapter that owns
//! the session; this service only deals with users and password hashes.

use std::sync::Arc;

use tracing::debug;

use super::ports::{UserRepository, UserRepositoryError};
use super::trace_id::TRACE_ID;
use super::{
    DEFAULT_USER_IMAGE_URL, Error, LoginCredentials, NewUser, PasswordHasher, Registration,
    TraceId, User, UserId,
};

/// Result of a credential check.
///
/// `NotFound` covers both an unknown username and a wrong password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials matched this user.
    Found(User),
    /// No user matched the credentials.
    NotFound,
}

/// Failure modes of [`AuthService::signup`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignupError {
    /// The username is taken, either by the pre-check or the storage constraint.
    #[error("username already taken")]
    DuplicateUsername,
    /// Any other failure, already mapped to a domain error.
    #[error(transparent)]
    Failed(#[from] Error),
}

/// Authentication use-cases backed by a [`UserRepository`].
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AuthService {
    /// Service over `users` with the default Argon2id hasher.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            hasher: PasswordHasher,
        }
    }

    /// Hash the password and build an unsaved user record.
    ///
    /// The plaintext is dropped (and zeroed) when `registration` goes out of
    /// scope inside the blocking task. Hashing runs off the async executor.
    pub async fn register(&self, registration: Registration) -> Result<NewUser, Error> {
        let hasher = self.hasher;
        let trace_id = TraceId::current();
        let Registration {
            username,
            email,
            first_name,
            last_name,
            description,
            password,
            image_url,
        } = registration;

        let password_hash = tokio::task::spawn_blocking(move || match trace_id {
            Some(id) => TRACE_ID.sync_scope(id, || hasher.hash(&password)),
            None => hasher.hash(&password),
        })
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))??;

        Ok(NewUser {
            username,
            email,
            first_name,
            last_name,
            description,
            image_url: image_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_IMAGE_URL.to_owned()),
            admin: false,
            password_hash,
        })
    }

    /// Register and persist a new account.
    ///
    /// Checks for an existing username first to skip a wasted hash, then
    /// relies on the storage constraint for concurrent signups.
    pub async fn signup(&self, registration: Registration) -> Result<User, SignupError> {
        let existing = self
            .users
            .find_by_username(&registration.username)
            .await
            .map_err(Error::from)?;
        if existing.is_some() {
            return Err(SignupError::DuplicateUsername);
        }

        let new_user = self.register(registration).await?;
        match self.users.insert(&new_user).await {
            Ok(user) => Ok(user),
            Err(UserRepositoryError::DuplicateUsername { .. }) => {
                Err(SignupError::DuplicateUsername)
            }
            Err(other) => Err(SignupError::Failed(other.into())),
        }
    }

    /// Verify credentials against the stored hash.
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AuthOutcome, Error> {
        let user = self.users.find_by_username(credentials.username()).await?;
        let password = zeroize::Zeroizing::new(credentials.password().to_owned());
        let hasher = self.hasher;

        let outcome = tokio::task::spawn_blocking(move || match user {
            Some(user) if hasher.verify(&password, &user.password_hash) => {
                AuthOutcome::Found(user)
            }
            Some(_) => AuthOutcome::NotFound,
            None => {
                hasher.verify_dummy(&password);
                AuthOutcome::NotFound
            }
        })
        .await
        .map_err(|err| Error::internal(format!("password check task failed: {err}")))?;

        if outcome == AuthOutcome::NotFound {
            debug!("credential check failed");
        }
        Ok(outcome)
    }

    /// Resolve a session-bound user id to a user.
    ///
    /// A binding to a user that no longer exists resolves to `None` instead of
    /// failing the request.
    pub async fn resolve(&self, id: UserId) -> Result<Option<User>, Error> {
        match self.users.get(id).await {
            Ok(user) => Ok(Some(user)),
            Err(UserRepositoryError::NotFound { .. }) => {
                debug!(user_id = %id, "session bound to missing user");
                Ok(None)
            }
            Err(other) => Err(other.into()),
        }
    }
}
