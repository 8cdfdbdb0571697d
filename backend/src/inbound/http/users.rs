//! Users API handlers.
//!
//! ```text
//! POST /users {"name":"Ada","password":"s3cret","email":"ada@x.com","age":36}
//! GET /users
//! GET /users/{id}
//! PUT /users/{id} {"age":37}
//! DELETE /users/{id}
//! ```
//!
//! Bodies are decoded with [`parse_json_object`] so that malformed or
//! unexpected JSON yields the standard error envelope. Responses never carry
//! the stored password.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{NewUserFields, User, UserFieldChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_json_object;

/// Request body for `POST /users`.
///
/// Every field is optional and untyped at the transport level so that missing
/// or mistyped fields are reported together by the domain validator.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>, example = "s3cret")]
    pub password: Option<Value>,
    #[schema(value_type = Option<String>, example = "ada@example.com")]
    pub email: Option<Value>,
    /// Whole years in 0..=150.
    #[schema(value_type = Option<i64>, example = 36)]
    pub age: Option<Value>,
}

impl From<CreateUserRequest> for NewUserFields {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            password: value.password,
            email: value.email,
            age: value.age,
        }
    }
}

/// Request body for `PUT /users/{id}`. Passwords cannot be changed here.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[schema(value_type = Option<String>, example = "Ada King")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>, example = "ada@example.org")]
    pub email: Option<Value>,
    #[schema(value_type = Option<i64>, example = 37)]
    pub age: Option<Value>,
}

impl From<UpdateUserRequest> for UserFieldChanges {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            age: value.age,
        }
    }
}

/// User record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = 36)]
    pub age: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name().as_str().to_owned(),
            email: user.email().as_str().to_owned(),
            age: user.age().years(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// Response body for `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserListResponse {
    /// Number of users returned.
    pub count: usize,
    /// Users, most recently created first.
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
        Self {
            count: users.len(),
            users,
        }
    }
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid body, validation failure, or email in use", body = ErrorResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request: CreateUserRequest = parse_json_object(&body)?;
    let user = state.users.create(request.into()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// List every user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_api::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = UserListResponse),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListResponse>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(UserListResponse::from(users)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Hyphenated UUID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users_query.get_user(&path).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Partially update a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Hyphenated UUID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Malformed identifier, empty or invalid body, or email in use", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<UserResponse>> {
    let request: UpdateUserRequest = parse_json_object(&body)?;
    let user = state.users.update(&path, request.into()).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Delete a user, returning the removed record.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = String, Path, description = "Hyphenated UUID")),
    responses(
        (status = 200, description = "Deleted user", body = UserResponse),
        (status = 400, description = "Malformed identifier", body = ErrorResponse),
        (status = 404, description = "No such user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = state.users.delete(&path).await?;
    Ok(web::Json(UserResponse::from(&user)))
}
