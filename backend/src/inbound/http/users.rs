//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users        {"username":"Ler","email":"ler@x.com","password":"pw1234"}
//! POST   /api/users/login  {"email":"ler@x.com","password":"pw1234"}
//! PUT    /api/users/{id}   {"username":"Renamed"}
//! DELETE /api/users/{id}
//! ```
//!
//! Every response body carrying a user uses [`UserView`]; password hashes
//! never leave the service.

use actix_web::{Scope, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, NewUser, User, UserChanges};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    USER_ID_FIELD, login_validation_error, parse_user_id, user_validation_error,
};

/// Message returned with a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "You are now logged in!";

/// Public projection of a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Ler")]
    pub username: String,
    #[schema(example = "ler@x.com")]
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().get(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Request body for `POST /api/users`.
///
/// Missing fields deserialise as empty strings so validation can name them.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// At least 4 characters.
    #[serde(default)]
    pub password: String,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        NewUser::try_from_parts(&value.username, &value.email, &value.password)
            .map_err(user_validation_error)
    }
}

/// Request body for `PUT /api/users/{id}`; at least one field is required.
#[derive(Deserialize, Serialize, ToSchema, Default)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        UserChanges::try_from_parts(
            value.username.as_deref(),
            value.email.as_deref(),
            value.password.as_deref(),
        )
        .map_err(user_validation_error)
    }
}

/// Request body for `POST /api/users/login`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        LoginCredentials::try_from_parts(&value.email, &value.password)
            .map_err(login_validation_error)
    }
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserView,
    #[schema(example = "You are now logged in!")]
    pub message: String,
}

/// Confirmation returned by `DELETE /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub id: i32,
    pub deleted: bool,
}

/// List every user in ascending id order.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserView]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserView>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserView::from).collect()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserView),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No user found with this id!", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserView>> {
    let id = parse_user_id(&path.into_inner(), USER_ID_FIELD)?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(UserView::from(&user)))
}

/// Create an account; the password is hashed before it is stored.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = UserView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email address already in use!", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<UserView>> {
    let new_user = NewUser::try_from(payload.into_inner())?;
    let user = state.users_command.create_user(new_user).await?;
    Ok(web::Json(UserView::from(&user)))
}

/// Check an email/password pair.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "No user with that email address!", body = ErrorSchema),
        (status = 404, description = "Incorrect password!", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    debug!(user_id = %user.id(), "login accepted");
    Ok(web::Json(LoginResponse {
        user: UserView::from(&user),
        message: LOGIN_SUCCESS_MESSAGE.to_owned(),
    }))
}

/// Apply a partial update and return the updated user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserView),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No user found with this id!", body = ErrorSchema),
        (status = 409, description = "Email address already in use!", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserView>> {
    let id = parse_user_id(&path.into_inner(), USER_ID_FIELD)?;
    let changes = UserChanges::try_from(payload.into_inner())?;
    let user = state.users_command.update_user(id, changes).await?;
    Ok(web::Json(UserView::from(&user)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted", body = DeleteUserResponse),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 404, description = "No user found with this id!", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let id = parse_user_id(&path.into_inner(), USER_ID_FIELD)?;
    state.users_command.delete_user(id).await?;
    Ok(web::Json(DeleteUserResponse {
        id: id.get(),
        deleted: true,
    }))
}

/// Scope mounting every user route under `/api/users`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use accounts::inbound::http::users;
///
/// let app = App::new().service(users::scope());
/// ```
pub fn scope() -> Scope {
    web::scope("/api/users")
        .service(list_users)
        .service(create_user)
        .service(login)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
}
