//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers only see domain-friendly operations:
//! binding a user id, clearing it, and queueing flash messages for the next
//! rendered page.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, User, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "_flashes";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Bind `user` to this session, replacing any previous binding.
    ///
    /// The session key is renewed so an id issued before login cannot be
    /// reused afterwards.
    pub fn login(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user.id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Clear the user binding. Returns whether one was present.
    pub fn logout(&self) -> Result<bool, Error> {
        let was_bound = self.user_id()?.is_some();
        if was_bound {
            self.0.remove(USER_ID_KEY);
            self.0.renew();
        }
        Ok(was_bound)
    }

    /// The bound user id, if any.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        self.0
            .get::<i32>(USER_ID_KEY)
            .map(|id| id.map(UserId::new))
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut queued = self.peek_flashes();
        queued.push(message.into());
        self.0
            .insert(FLASH_KEY, queued)
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return every queued message.
    pub fn take_flashes(&self) -> Vec<String> {
        match self.0.remove_as::<Vec<String>>(FLASH_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                warn!(len = raw.len(), "discarding unreadable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    fn peek_flashes(&self) -> Vec<String> {
        self.0
            .get::<Vec<String>>(FLASH_KEY)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
