//! End-to-end page flows over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{
    App,
    body::BoxBody,
    dev::{Service, ServiceResponse},
    http::{StatusCode, header},
    test::{self, TestRequest},
    web,
};
use backend::Trace;
use backend::domain::TRACE_ID_HEADER;
use backend::inbound::http::configure;
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::seeded()
}

async fn init_app(
    store: InMemoryStore,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let state = HttpState::from_store(Arc::new(store));
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(session)
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Follows a browser's cookie jar across requests.
struct Client<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

impl<S> Client<S>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    fn new(app: S) -> Self {
        Self { app, cookie: None }
    }

    async fn send(&mut self, request: TestRequest) -> ServiceResponse<BoxBody> {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let res = test::call_service(&self.app, request.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
        {
            self.cookie = Some(cookie.into_owned());
        }
        res
    }

    async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        let res = self.send(TestRequest::get().uri(uri)).await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    async fn post(&mut self, uri: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
        let res = self.send(TestRequest::post().uri(uri).set_form(form)).await;
        let location = res
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        (res.status(), location)
    }
}

const SIGNUP: &[(&str, &str)] = &[
    ("username", "alice"),
    ("first_name", "Alice"),
    ("last_name", "Adams"),
    ("description", ""),
    ("email", "alice@example.com"),
    ("password", "secret1"),
    ("image_url", ""),
];

#[rstest]
#[actix_web::test]
async fn visitor_signs_up_adds_a_cafe_and_logs_out(store: InMemoryStore) {
    let mut client = Client::new(init_app(store).await);

    let (status, location) = client.post("/signup", SIGNUP).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/cafes");

    let (status, view) = client.get("/cafes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["current_user"]["username"], "alice");
    assert_eq!(view["messages"], json!(["Welcome, alice!"]));
    assert_eq!(view["context"]["cafes"], json!([]));

    let (status, location) = client
        .post(
            "/cafes/add",
            &[
                ("name", "Java"),
                ("description", ""),
                ("url", ""),
                ("address", "1 Main St"),
                ("city_code", "sf"),
                ("image_url", ""),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, view) = client.get(&location).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["context"]["cafe"]["name"], "Java");
    assert_eq!(view["context"]["city_state"], "San Francisco, CA");
    assert_eq!(view["messages"], json!(["Java added"]));

    let (status, view) = client.get("/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["context"]["full_name"], "Alice Adams");

    let (status, location) = client.post("/logout", &[]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/");

    let res = client.send(TestRequest::get().uri("/profile")).await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let (_, view) = client.get("/login").await;
    assert_eq!(
        view["messages"],
        json!(["Successfully logged out.", "You are not logged in."])
    );
}

#[rstest]
#[actix_web::test]
async fn returning_user_logs_in_with_the_signup_password(store: InMemoryStore) {
    let mut signup = Client::new(init_app(store.clone()).await);
    signup.post("/signup", SIGNUP).await;

    let mut client = Client::new(init_app(store).await);
    let (status, _) = client
        .post("/login", &[("username", "alice"), ("password", "wrong1")])
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, location) = client
        .post("/login", &[("username", "alice"), ("password", "secret1")])
        .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, "/cafes");

    let (_, view) = client.get("/").await;
    assert_eq!(view["current_user"]["username"], "alice");
    assert_eq!(view["messages"], json!(["Hello, alice!"]));
}

#[rstest]
#[actix_web::test]
async fn errors_carry_the_request_trace_id(store: InMemoryStore) {
    let mut client = Client::new(init_app(store).await);

    let res = client.send(TestRequest::get().uri("/cafes/404")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let header_id = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .expect("trace id header")
        .to_owned();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["traceId"], header_id.as_str());
}
