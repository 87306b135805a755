//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the user endpoints, the welcome route, the
//! health checks and the error envelope schemas. Swagger UI serves it in debug
//! builds and `cargo run --bin openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{
    CreateUserRequest, UpdateUserRequest, UserResponse, WelcomeResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Dashboard API",
        description = "CRUD interface over user records plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::welcome,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserResponse,
        CreateUserRequest,
        UpdateUserRequest,
        WelcomeResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "meta", description = "Service metadata")
    )
)]
pub struct ApiDoc;
