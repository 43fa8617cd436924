//! Cafe pages: list, detail, add and edit.
//!
//! ```text
//! GET  /cafes
//! GET  /cafes/{id}
//! GET  /cafes/add          POST /cafes/add
//! GET  /cafes/{id}/edit    POST /cafes/{id}/edit
//! ```
//!
//! Add and edit are open to anonymous visitors, as the directory has always
//! behaved. `/cafes/add` must be registered before `/cafes/{id}`.

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;

use super::ApiResult;
use super::context::RequestContext;
use super::state::HttpState;
use super::view::{View, redirect, templates};
use crate::domain::forms::{CafeForm, CityChoices, FieldErrors};
use crate::domain::{Cafe, CafeId, CafeWithCity, Error};

fn cafe_location(cafe: &Cafe) -> String {
    format!("/cafes/{}", cafe.id)
}

async fn city_choices(state: &HttpState) -> ApiResult<CityChoices> {
    let cities = state.cities.list().await?;
    Ok(CityChoices::from_cities(&cities))
}

fn form_view(
    template: &'static str,
    form: &CafeForm,
    choices: &CityChoices,
    errors: &FieldErrors,
    cafe: Option<&Cafe>,
) -> View {
    View::new(
        template,
        json!({
            "form": form,
            "cities": choices,
            "errors": errors,
            "cafe": cafe,
        }),
    )
}

/// All cafes ordered by name.
#[get("/cafes")]
pub async fn list_cafes(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<HttpResponse> {
    let cafes = state.cafes.list().await?;
    Ok(View::new(templates::CAFE_LIST, json!({ "cafes": cafes })).render(&ctx))
}

/// Empty add form with the current city choices.
#[get("/cafes/add")]
pub async fn add_cafe_form(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<HttpResponse> {
    let choices = city_choices(&state).await?;
    let form = CafeForm::default();
    Ok(form_view(templates::CAFE_ADD, &form, &choices, &FieldErrors::new(), None).render(&ctx))
}

/// Validate and insert a cafe, then redirect to its page.
#[post("/cafes/add")]
pub async fn add_cafe(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    form: web::Form<CafeForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let choices = city_choices(&state).await?;
    let draft = match form.validate(&choices) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(form_view(templates::CAFE_ADD, &form, &choices, &errors, None).rerender(&ctx));
        }
    };

    let cafe = state.cafes.insert(&draft).await?;
    info!(cafe_id = %cafe.id, name = %cafe.name, "cafe added");
    ctx.session.flash(format!("{} added", cafe.name))?;
    Ok(redirect(&cafe_location(&cafe)))
}

/// Cafe detail with its city and like count. Unknown ids are 404.
#[get("/cafes/{id}")]
pub async fn show_cafe(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let cafe = state.cafes.get(CafeId::new(path.into_inner())).await?;
    let city = state
        .cities
        .find(&cafe.city_code)
        .await?
        .ok_or_else(|| Error::internal(format!("cafe {} references a missing city", cafe.id)))?;
    let liked_by = state.likes.liking_users(cafe.id).await?.len();
    let detail = CafeWithCity { cafe, city };
    let city_state = detail.city_state();

    Ok(View::new(
        templates::CAFE_DETAIL,
        json!({
            "cafe": detail.cafe,
            "city_state": city_state,
            "liked_by": liked_by,
        }),
    )
    .render(&ctx))
}

/// Edit form seeded from the stored cafe.
#[get("/cafes/{id}/edit")]
pub async fn edit_cafe_form(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let cafe = state.cafes.get(CafeId::new(path.into_inner())).await?;
    let choices = city_choices(&state).await?;
    let form = CafeForm::from_cafe(&cafe);
    Ok(
        form_view(templates::CAFE_EDIT, &form, &choices, &FieldErrors::new(), Some(&cafe))
            .render(&ctx),
    )
}

/// Replace every field of an existing cafe.
#[post("/cafes/{id}/edit")]
pub async fn edit_cafe(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    path: web::Path<i32>,
    form: web::Form<CafeForm>,
) -> ApiResult<HttpResponse> {
    let cafe = state.cafes.get(CafeId::new(path.into_inner())).await?;
    let form = form.into_inner();
    let choices = city_choices(&state).await?;
    let draft = match form.validate(&choices) {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(
                form_view(templates::CAFE_EDIT, &form, &choices, &errors, Some(&cafe))
                    .rerender(&ctx),
            );
        }
    };

    let updated = state.cafes.update(cafe.id, &draft).await?;
    info!(cafe_id = %updated.id, name = %updated.name, "cafe edited");
    ctx.session.flash(format!("{} edited", updated.name))?;
    Ok(redirect(&cafe_location(&updated)))
}

#[cfg(test)]
#[path = "cafes_tests.rs"]
mod tests;
