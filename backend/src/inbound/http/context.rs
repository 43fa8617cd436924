//! Per-request context: the session plus the user it is bound to.
//!
//! The current user is resolved once per request by the extractor and passed
//! to handlers as a parameter. Nothing about the user is kept in process-wide
//! state.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::{Error, User};

/// Session and resolved user for the current request.
pub struct RequestContext {
    pub session: SessionContext,
    pub user: Option<User>,
}

impl RequestContext {
    /// The logged-in user, if the session is bound to one that still exists.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let user = match session.user_id()? {
                Some(id) => state.auth.resolve(id).await?,
                None => None,
            };
            Ok(Self { session, user })
        })
    }
}
