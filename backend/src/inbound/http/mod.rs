//! HTTP inbound adapter serving the cafe directory pages.

pub mod auth;
pub mod cafes;
pub mod context;
pub mod error;
pub mod health;
pub mod pages;
pub mod profile;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod view;

use actix_web::web;

pub use error::ApiResult;

/// Register every page route.
///
/// `/cafes/add` is registered ahead of `/cafes/{id}` so the literal segment
/// wins.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::homepage)
        .service(cafes::list_cafes)
        .service(cafes::add_cafe_form)
        .service(cafes::add_cafe)
        .service(cafes::show_cafe)
        .service(cafes::edit_cafe_form)
        .service(cafes::edit_cafe)
        .service(auth::signup_form)
        .service(auth::signup)
        .service(auth::login_form)
        .service(auth::login)
        .service(auth::logout)
        .service(profile::show_profile)
        .service(profile::edit_profile_form)
        .service(profile::edit_profile);
}
