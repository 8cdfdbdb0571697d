//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use crate::domain::Error;

/// Message returned for requests that match no route.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

/// Fallback handler for unmatched routes.
pub async fn route_not_found() -> ApiResult<actix_web::HttpResponse> {
    Err(Error::not_found(ROUTE_NOT_FOUND_MESSAGE))
}

/// Register the user endpoints.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::configure_users;
///
/// let app = App::new().configure(configure_users);
/// ```
pub fn configure_users(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user);
}
