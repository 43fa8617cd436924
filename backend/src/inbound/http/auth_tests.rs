//! Tests for signup, login and logout.

use super::*;
use crate::domain::Username;
use crate::domain::ports::UserRepository;
use crate::inbound::http::test_utils::{
    error_fields, location, memory_state, read_view, refreshed_cookie, session_cookie,
    signup_fields, test_app,
};
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

async fn sign_up(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/signup")
            .set_form(signup_fields(username, password))
            .to_request(),
    )
    .await
}

async fn log_in(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> ServiceResponse {
    actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/login")
            .set_form([("username", username), ("password", password)])
            .to_request(),
    )
    .await
}

async fn homepage_with(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: Cookie<'static>,
) -> Value {
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    read_view(res).await
}

#[actix_web::test]
async fn signup_logs_the_new_user_in() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = sign_up(&app, "alice", "hunter22").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cafes");
    let cookie = session_cookie(&res);

    let view = homepage_with(&app, cookie).await;
    assert_eq!(view["current_user"]["username"], "alice");
    assert!(view["current_user"].get("password_hash").is_none());
    assert_eq!(view["messages"], json!(["Welcome, alice!"]));

    let username = Username::new("alice").expect("username");
    let stored = UserRepository::find_by_username(&store, &username)
        .await
        .expect("lookup")
        .expect("user stored");
    assert_ne!(stored.password_hash.as_encoded(), "hunter22");
}

#[actix_web::test]
async fn duplicate_signup_is_rejected_on_the_username_field() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let first = sign_up(&app, "alice", "hunter22").await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let res = sign_up(&app, "alice", "another1").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::SIGNUP);
    assert_eq!(error_fields(&view), ["username"]);
    assert_eq!(
        view["context"]["errors"]["username"][0]["message"],
        "Username already taken"
    );
    assert!(view["context"]["form"].get("password").is_none());
    assert!(view["current_user"].is_null());

    // The original account still accepts only its own password.
    let res = log_in(&app, "alice", "another1").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let username = Username::new("alice").expect("username");
    assert!(
        UserRepository::find_by_username(&store, &username)
            .await
            .expect("lookup")
            .is_some()
    );
}

#[rstest]
#[case("password", "12345")]
#[case("email", "not-an-email")]
#[actix_web::test]
async fn invalid_signup_is_rerendered(#[case] field: &str, #[case] value: &str) {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let mut fields = signup_fields("bob", "hunter22");
    for (name, current) in &mut fields {
        if *name == field {
            *current = value.to_owned();
        }
    }
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/signup")
            .set_form(fields)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&read_view(res).await), [field]);
}

#[actix_web::test]
async fn login_with_correct_password_greets_the_user() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    sign_up(&app, "alice", "hunter22").await;

    let res = log_in(&app, "alice", "hunter22").await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/cafes");

    let view = homepage_with(&app, session_cookie(&res)).await;
    assert_eq!(view["current_user"]["username"], "alice");
    assert_eq!(view["messages"], json!(["Hello, alice!"]));
}

#[rstest]
#[case("alice", "wrong-password")]
#[case("nobody", "hunter22")]
#[actix_web::test]
async fn failed_login_shows_a_form_level_error(#[case] username: &str, #[case] password: &str) {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    sign_up(&app, "alice", "hunter22").await;

    let res = log_in(&app, username, password).await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::LOGIN);
    assert_eq!(error_fields(&view), ["form"]);
    assert_eq!(
        view["context"]["errors"]["form"][0]["message"],
        "Invalid credentials."
    );
    assert_eq!(view["context"]["form"]["username"], username);
    assert!(view["current_user"].is_null());
}

#[actix_web::test]
async fn login_requires_both_fields() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = log_in(&app, "", "").await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_fields(&read_view(res).await), ["password", "username"]);
}

#[actix_web::test]
async fn logout_clears_the_session() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;
    let res = sign_up(&app, "alice", "hunter22").await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
    let cookie = refreshed_cookie(&res, cookie);

    let view = homepage_with(&app, cookie).await;
    assert!(view["current_user"].is_null());
    assert_eq!(
        view["messages"],
        json!(["Welcome, alice!", "Successfully logged out."])
    );
}

#[actix_web::test]
async fn logout_when_anonymous_just_redirects() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post().uri("/logout").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/");
}

#[actix_web::test]
async fn logout_of_a_vanished_user_clears_the_binding_silently() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state).route(
        "/bind-missing-user",
        web::get().to(|session: actix_session::Session| async move {
            session.insert(crate::inbound::http::session::USER_ID_KEY, 999_i32)?;
            Ok::<_, actix_web::Error>(HttpResponse::Ok())
        }),
    ))
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/bind-missing-user")
            .to_request(),
    )
    .await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let cookie = refreshed_cookie(&res, cookie);

    let view = homepage_with(&app, cookie).await;
    assert!(view["current_user"].is_null());
    assert_eq!(view["messages"], json!([]));
}
