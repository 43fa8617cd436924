//! Static landing page.

use actix_web::{HttpResponse, get};
use serde_json::json;

use super::context::RequestContext;
use super::view::{View, templates};

/// Landing page.
#[get("/")]
pub async fn homepage(ctx: RequestContext) -> HttpResponse {
    View::new(templates::HOMEPAGE, json!({})).render(&ctx)
}
