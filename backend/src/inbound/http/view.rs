//! Responses handed to the template renderer.
//!
//! Handlers never produce markup. A page is a [`View`]: the template name, a
//! JSON context, the flash messages drained from the session and the current
//! user. It is returned as JSON so any renderer can sit in front of the
//! service.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use serde::Serialize;
use serde_json::Value;

use super::context::RequestContext;
use crate::domain::User;

/// Template names for every page.
pub mod templates {
    pub const HOMEPAGE: &str = "homepage.html";
    pub const CAFE_LIST: &str = "cafe/list.html";
    pub const CAFE_DETAIL: &str = "cafe/detail.html";
    pub const CAFE_ADD: &str = "cafe/add-form.html";
    pub const CAFE_EDIT: &str = "cafe/edit-form.html";
    pub const SIGNUP: &str = "auth/signup-form.html";
    pub const LOGIN: &str = "auth/login-form.html";
    pub const PROFILE: &str = "profile/detail.html";
    pub const PROFILE_EDIT: &str = "profile/edit-form.html";
}

#[derive(Debug, Serialize)]
struct ViewBody<'a> {
    template: &'static str,
    context: Value,
    messages: Vec<String>,
    current_user: Option<&'a User>,
}

/// A template plus the data it renders.
#[derive(Debug)]
pub struct View {
    template: &'static str,
    context: Value,
}

impl View {
    /// View of `template` with `context`. Messages are added on render.
    pub fn new(template: &'static str, context: Value) -> Self {
        Self { template, context }
    }

    /// `200 OK` page.
    pub fn render(self, ctx: &RequestContext) -> HttpResponse {
        self.respond(ctx, StatusCode::OK)
    }

    /// A form shown again after failed validation.
    pub fn rerender(self, ctx: &RequestContext) -> HttpResponse {
        self.respond(ctx, StatusCode::UNPROCESSABLE_ENTITY)
    }

    fn respond(self, ctx: &RequestContext, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(ViewBody {
            template: self.template,
            context: self.context,
            messages: ctx.session.take_flashes(),
            current_user: ctx.user(),
        })
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}
