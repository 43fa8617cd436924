//! Tests for the cafe pages.

use super::*;
use crate::domain::ports::CafeRepository;
use crate::domain::{CafeDraft, CityCode, DEFAULT_CAFE_IMAGE_URL};
use crate::inbound::http::test_utils::{
    error_fields, location, memory_state, read_view, session_cookie, test_app,
};
use crate::outbound::memory::InMemoryStore;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::Value;

fn cafe_fields(name: &str, city_code: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_owned()),
        ("description", String::new()),
        ("url", String::new()),
        ("address", "1 Main St".to_owned()),
        ("city_code", city_code.to_owned()),
        ("image_url", String::new()),
    ]
}

async fn insert_cafe(store: &InMemoryStore, name: &str, description: &str) -> Cafe {
    let draft = CafeDraft::new(
        name,
        description,
        "https://example.com",
        "9 Side St",
        CityCode::new("oak").expect("code"),
        None,
    );
    CafeRepository::insert(store, &draft).await.expect("insert cafe")
}

#[actix_web::test]
async fn list_orders_cafes_by_name() {
    let (state, store) = memory_state();
    for name in ["Zeitgeist", "Arabica", "Mocha"] {
        insert_cafe(&store, name, "").await;
    }
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/cafes").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::CAFE_LIST);
    let names: Vec<&str> = view["context"]["cafes"]
        .as_array()
        .expect("cafes")
        .iter()
        .filter_map(|cafe| cafe["name"].as_str())
        .collect();
    assert_eq!(names, ["Arabica", "Mocha", "Zeitgeist"]);
}

#[rstest]
#[case("/cafes/999")]
#[case("/cafes/not-a-number")]
#[case("/cafes/999/edit")]
#[actix_web::test]
async fn unknown_cafe_is_not_found(#[case] uri: &str) {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn add_form_is_not_shadowed_by_detail_route() {
    let (state, _store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/cafes/add").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::CAFE_ADD);
    let codes: Vec<&str> = view["context"]["cities"]
        .as_array()
        .expect("city choices")
        .iter()
        .filter_map(|city| city["code"].as_str())
        .collect();
    assert_eq!(codes, ["berk", "oak", "sf"]);
}

#[actix_web::test]
async fn adding_a_cafe_redirects_to_its_detail_page() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cafes/add")
            .set_form(cafe_fields("Java", "sf"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let target = location(&res);
    let cookie = session_cookie(&res);

    let stored = CafeRepository::list(&store).await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(target, format!("/cafes/{}", stored[0].id));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&target)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::CAFE_DETAIL);
    assert_eq!(view["context"]["cafe"]["name"], "Java");
    assert_eq!(view["context"]["cafe"]["image_url"], DEFAULT_CAFE_IMAGE_URL);
    assert_eq!(view["context"]["city_state"], "San Francisco, CA");
    assert_eq!(view["messages"], serde_json::json!(["Java added"]));
}

#[rstest]
#[case("name", "", "sf")]
#[case("city_code", "Java", "nyc")]
#[actix_web::test]
async fn invalid_cafe_is_rerendered_without_saving(
    #[case] failing_field: &str,
    #[case] name: &str,
    #[case] city_code: &str,
) {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cafes/add")
            .set_form(cafe_fields(name, city_code))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::CAFE_ADD);
    assert_eq!(error_fields(&view), [failing_field]);
    assert_eq!(view["context"]["form"]["city_code"], city_code);
    assert!(CafeRepository::list(&store).await.expect("list").is_empty());
}

#[actix_web::test]
async fn edit_form_shows_placeholder_image_as_empty() {
    let (state, store) = memory_state();
    let cafe = insert_cafe(&store, "Mocha", "Dark roast").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/cafes/{}/edit", cafe.id))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::CAFE_EDIT);
    assert_eq!(view["context"]["form"]["description"], "Dark roast");
    assert_eq!(view["context"]["form"]["image_url"], "");
    assert_eq!(view["context"]["cafe"]["id"], Value::from(cafe.id.get()));
}

#[actix_web::test]
async fn editing_replaces_every_field() {
    let (state, store) = memory_state();
    let cafe = insert_cafe(&store, "Mocha", "Dark roast").await;
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/cafes/{}/edit", cafe.id))
            .set_form(cafe_fields("Mocha Two", "berk"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), format!("/cafes/{}", cafe.id));

    let stored = CafeRepository::get(&store, cafe.id).await.expect("get");
    assert_eq!(stored.name, "Mocha Two");
    assert_eq!(stored.description, "");
    assert_eq!(stored.url, "");
    assert_eq!(stored.city_code.as_ref(), "berk");
    assert_eq!(stored.image_url, DEFAULT_CAFE_IMAGE_URL);

    let cookie = session_cookie(&res);
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/cafes/{}", cafe.id))
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let view = read_view(res).await;
    assert_eq!(view["messages"], serde_json::json!(["Mocha Two edited"]));
    assert_eq!(view["context"]["city_state"], "Berkeley, CA");
}

#[rstest]
#[case("name")]
#[case("address")]
#[case("city_code")]
#[actix_web::test]
async fn invalid_edit_leaves_the_cafe_unchanged(#[case] missing: &str) {
    let (state, store) = memory_state();
    let cafe = insert_cafe(&store, "Mocha", "Dark roast").await;
    let app = actix_test::init_service(test_app(state)).await;

    let fields: Vec<_> = cafe_fields("Mocha Two", "berk")
        .into_iter()
        .filter(|(field, _)| *field != missing)
        .collect();
    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/cafes/{}/edit", cafe.id))
            .set_form(fields)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let view = read_view(res).await;
    assert_eq!(view["template"], templates::CAFE_EDIT);
    assert_eq!(error_fields(&view), [missing]);

    let stored = CafeRepository::get(&store, cafe.id).await.expect("get");
    assert_eq!(stored, cafe);
}

#[actix_web::test]
async fn editing_unknown_cafe_is_not_found() {
    let (state, store) = memory_state();
    let app = actix_test::init_service(test_app(state)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/cafes/41/edit")
            .set_form(cafe_fields("Ghost", "sf"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(CafeRepository::list(&store).await.expect("list").is_empty());
}
