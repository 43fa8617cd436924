//! The logged-in user's profile.
//!
//! Both routes redirect anonymous visitors to `/login` before reading or
//! validating anything.

use actix_web::{HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;

use super::ApiResult;
use super::context::RequestContext;
use super::state::HttpState;
use super::view::{View, redirect, templates};
use crate::domain::Error;
use crate::domain::forms::{FieldErrors, ProfileEditForm};

pub(crate) const NOT_LOGGED_IN: &str = "You are not logged in.";

fn login_redirect(ctx: &RequestContext) -> ApiResult<HttpResponse> {
    ctx.session.flash(NOT_LOGGED_IN)?;
    Ok(redirect("/login"))
}

fn form_view(form: &ProfileEditForm, errors: &FieldErrors) -> View {
    View::new(
        templates::PROFILE_EDIT,
        json!({ "form": form, "errors": errors }),
    )
}

/// The user's details and liked cafes.
#[get("/profile")]
pub async fn show_profile(
    state: web::Data<HttpState>,
    ctx: RequestContext,
) -> ApiResult<HttpResponse> {
    let Some(user) = ctx.user() else {
        return login_redirect(&ctx);
    };
    let liked = state.likes.liked_cafes(user.id).await?;

    Ok(View::new(
        templates::PROFILE,
        json!({
            "user": user,
            "full_name": user.full_name(),
            "liked_cafes": liked,
        }),
    )
    .render(&ctx))
}

/// Edit form seeded from the user.
#[get("/profile/edit")]
pub async fn edit_profile_form(ctx: RequestContext) -> ApiResult<HttpResponse> {
    let Some(user) = ctx.user() else {
        return login_redirect(&ctx);
    };
    let form = ProfileEditForm::from_user(user);
    Ok(form_view(&form, &FieldErrors::new()).render(&ctx))
}

/// Replace the editable profile fields.
///
/// The body is only parsed once the visitor is known to be logged in.
#[post("/profile/edit")]
pub async fn edit_profile(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    form: Result<web::Form<ProfileEditForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = ctx.user().map(|user| user.id) else {
        return login_redirect(&ctx);
    };
    let form = form
        .map_err(|error| Error::invalid_request(error.to_string()))?
        .into_inner();
    let update = match form.validate() {
        Ok(update) => update,
        Err(errors) => return Ok(form_view(&form, &errors).rerender(&ctx)),
    };

    state.users.update_profile(user_id, &update).await?;
    info!(user_id = %user_id, "profile edited");
    ctx.session.flash("Profile edited.")?;
    Ok(redirect("/profile"))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
