//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/login      {"email":"admin@mail.com","password":"root123"}
//! POST   /api/v1/logout
//! POST   /api/v1/users      {"email":"a@b.fr","password":"pw","postalCode":75001}
//! PUT    /api/v1/users/{id} {"postalCode":69001}
//! DELETE /api/v1/users/{id}
//! ```
//!
//! Mutation bodies are forwarded as raw bytes so the domain pipeline owns
//! parsing and can report malformed payloads in its own error vocabulary.

use actix_web::{HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UserRequestSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"admin@mail.com","password":"root123"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Authenticate a user and establish a session.
///
/// The session cookie carries the account id and its roles; later mutation
/// requests are authorised from it.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let principal = state.login.authenticate(&credentials).await?;
    session.persist_principal(&principal)?;
    Ok(HttpResponse::Ok().finish())
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Register an account.
///
/// Open to anonymous callers. The new account always receives the default
/// role; a `roles` key in the body is discarded.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use advice_api::inbound::http::users::create_user;
///
/// let app = App::new().service(create_user);
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequestSchema,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Malformed payload", body = ErrorSchema),
        (status = 422, description = "Account failed validation", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let principal = session.principal();
    let view = state.users.create(&principal, &body).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Patch an account with the keys present in the body.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequestSchema,
    responses(
        (status = 200, description = "Account updated", body = UserSchema),
        (status = 400, description = "Malformed payload or no recognised fields", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrator role required", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema),
        (status = 422, description = "Account failed validation", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let principal = session.principal();
    let id = UserId::new(path.into_inner());
    let view = state.users.update(&principal, id, &body).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Remove an account.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Account removed"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrator role required", body = ErrorSchema),
        (status = 404, description = "Unknown account", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal();
    state
        .users
        .delete(&principal, UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
