//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users       {"name":"Ann","email":"ann@x.com","age":30,"role":"admin"}
//! PUT    /api/users/{id}  {"age":null}
//! DELETE /api/users/{id}
//! ```

use std::str::FromStr;

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Age, EmailAddress, Error, NewUser, Role, User, UserId, UserName, UserPatch,
    UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_validation_error;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/users`.
///
/// A missing `name` or `email` is reported as empty.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name; trimmed, must not be empty.
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: String,
    /// Email address; trimmed and lowercased, must be unique.
    #[serde(default)]
    #[schema(example = "ann@x.com")]
    pub email: String,
    /// Optional non-negative age.
    #[serde(default)]
    pub age: Option<i64>,
    /// One of `user`, `admin`, `moderator`; defaults to `user`.
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, value.age, value.role.as_deref())
    }
}

/// Distinguish an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for `PUT /api/users/{id}`.
///
/// Absent fields are left unchanged. `"age": null` clears the age; `null`
/// for any other field counts as absent.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Replacement display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Replacement email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Replacement age; `null` clears it.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<i64>)]
    pub age: Option<Option<i64>>,
    /// Replacement role.
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let UpdateUserRequest {
            name,
            email,
            age,
            role,
        } = value;
        Ok(Self {
            name: name.map(UserName::new).transpose()?,
            email: email.map(EmailAddress::new).transpose()?,
            age: age
                .map(|inner| inner.map(Age::new).transpose())
                .transpose()?,
            role: role.as_deref().map(Role::from_str).transpose()?,
        })
    }
}

/// Wire representation of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Stable identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Lowercased email address.
    pub email: String,
    /// Age, omitted when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Assigned role.
    #[schema(example = "user")]
    pub role: String,
    /// Creation time in RFC 3339.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            age: user.age().map(Age::get),
            role: user.role().to_string(),
            created_at: user.created_at(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Greeting returned by `GET /`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WelcomeResponse {
    /// Fixed greeting.
    #[schema(example = "Welcome to the User Dashboard API")]
    pub message: String,
}

/// An identifier that cannot name a stored user is reported as unknown.
fn parse_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(format!("user {raw} not found")))
}

/// Root greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = WelcomeResponse)),
    tags = ["meta"],
    operation_id = "welcome"
)]
#[get("/")]
pub async fn welcome() -> web::Json<WelcomeResponse> {
    web::Json(WelcomeResponse {
        message: "Welcome to the User Dashboard API".to_owned(),
    })
}

/// List every user in creation order.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(web::scope("/api").service(list_users));
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = UserResponse),
        (status = 400, description = "Invalid request or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewUser::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state.commands.create_user(draft).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Update some fields of a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid request or duplicate email", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_id(&path.into_inner())?;
    let patch = UserPatch::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state.commands.update_user(&id, patch).await?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user permanently.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path.into_inner())?;
    state.commands.delete_user(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
