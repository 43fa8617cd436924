//! Signup, login and logout.
//!
//! A failed login always shows the same form-level message whether the
//! username exists or not.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use super::ApiResult;
use super::context::RequestContext;
use super::state::HttpState;
use super::view::{View, redirect, templates};
use crate::domain::forms::{FieldErrors, LoginForm, SignupForm};
use crate::domain::{AuthOutcome, SignupError, User};

fn form_view(template: &'static str, form: &impl Serialize, errors: &FieldErrors) -> View {
    View::new(template, json!({ "form": form, "errors": errors }))
}

fn bind_session(ctx: &RequestContext, user: &User, greeting: String) -> ApiResult<HttpResponse> {
    ctx.session.login(user)?;
    ctx.session.flash(greeting)?;
    Ok(redirect("/cafes"))
}

/// Blank signup form.
#[get("/signup")]
pub async fn signup_form(ctx: RequestContext) -> HttpResponse {
    form_view(templates::SIGNUP, &SignupForm::default(), &FieldErrors::new()).render(&ctx)
}

/// Register and log in a new user.
///
/// A taken username re-renders the form with a field error.
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(errors) => return Ok(form_view(templates::SIGNUP, &form, &errors).rerender(&ctx)),
    };

    match state.auth.signup(registration).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user signed up");
            bind_session(&ctx, &user, format!("Welcome, {}!", user.username))
        }
        Err(SignupError::DuplicateUsername) => {
            debug!("signup rejected for existing username");
            let errors = SignupForm::duplicate_username();
            Ok(form_view(templates::SIGNUP, &form, &errors).rerender(&ctx))
        }
        Err(SignupError::Failed(error)) => Err(error),
    }
}

/// Blank login form.
#[get("/login")]
pub async fn login_form(ctx: RequestContext) -> HttpResponse {
    form_view(templates::LOGIN, &LoginForm::default(), &FieldErrors::new()).render(&ctx)
}

/// Check credentials and bind the session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    ctx: RequestContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let credentials = match form.validate() {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(form_view(templates::LOGIN, &form, &errors).rerender(&ctx)),
    };

    match state.auth.authenticate(&credentials).await? {
        AuthOutcome::Found(user) => {
            info!(user_id = %user.id, "user logged in");
            bind_session(&ctx, &user, format!("Hello, {}!", user.username))
        }
        AuthOutcome::NotFound => {
            let errors = LoginForm::invalid_credentials();
            Ok(form_view(templates::LOGIN, &form, &errors).rerender(&ctx))
        }
    }
}

/// Unbind the session. Only a resolved user gets the goodbye message.
#[post("/logout")]
pub async fn logout(ctx: RequestContext) -> ApiResult<HttpResponse> {
    ctx.session.logout()?;
    if let Some(user) = ctx.user() {
        info!(user_id = %user.id, "user logged out");
        ctx.session.flash("Successfully logged out.")?;
    }
    Ok(redirect("/"))
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
