//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use super::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Session middleware with a fresh key and the `Secure` flag off for plain
/// HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over a seeded in-memory store. The store is returned so tests
/// can inspect what the handlers persisted.
pub fn memory_state() -> (web::Data<HttpState>, InMemoryStore) {
    let store = InMemoryStore::seeded();
    let state = HttpState::from_store(Arc::new(store.clone()));
    (web::Data::new(state), store)
}

/// Every page route over `state`, behind the test session middleware.
pub fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(test_session_middleware())
        .configure(super::configure)
}

/// The `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// The cookie set by `res`, or `current` when the session was left untouched.
pub fn refreshed_cookie<B>(res: &ServiceResponse<B>, current: Cookie<'static>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .unwrap_or(current)
}

/// Decode a rendered view.
pub async fn read_view<B: MessageBody>(res: ServiceResponse<B>) -> Value {
    actix_test::read_body_json(res).await
}

/// A complete, valid signup submission.
pub fn signup_fields(username: &str, password: &str) -> Vec<(&'static str, String)> {
    vec![
        ("username", username.to_owned()),
        ("first_name", "Ada".to_owned()),
        ("last_name", "Lovelace".to_owned()),
        ("description", String::new()),
        ("email", format!("{username}@example.com")),
        ("password", password.to_owned()),
        ("image_url", String::new()),
    ]
}

/// The `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> String {
    res.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned()
}

/// Field names with errors in a rendered form view.
pub fn error_fields(view: &Value) -> Vec<String> {
    view["context"]["errors"]
        .as_object()
        .map(|errors| errors.keys().cloned().collect())
        .unwrap_or_default()
}
