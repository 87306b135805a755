//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the welcome route and the `/api/users` resource.
///
/// Callers provide [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::welcome).service(
        web::scope("/api")
            .app_data(error::json_config())
            .service(users::list_users)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}
