//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::UserService;
use backend::domain::ports::UserRepository;
use backend::inbound::http::configure_api;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::memory::InMemoryUserRepository;
use backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

/// Pick the user store: PostgreSQL when a URL is configured, memory otherwise.
async fn build_repository(settings: &ServerSettings) -> Result<Arc<dyn UserRepository>> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database configured; users are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    run_pending_migrations(database_url.to_owned())
        .await
        .wrap_err("failed to migrate database")?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;
    info!(max_connections = settings.db_max_connections(), "using PostgreSQL user store");
    Ok(Arc::new(DieselUserRepository::new(pool)))
}

/// Wire the user service over the configured store.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState> {
    let repository = build_repository(settings).await?;
    let service = Arc::new(UserService::new(repository, Arc::new(DefaultClock)));
    Ok(HttpState::new(service.clone(), service))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and start serving.
///
/// The returned [`Server`] must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let bind_addr = settings.bind_addr();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "user dashboard API listening");
    health_state.mark_ready();
    Ok(server)
}
