//! Advice API handlers.
//!
//! ```text
//! POST   /api/v1/advices      {"text":"Sow beans","month":4}
//! PUT    /api/v1/advices/{id} {"month":5}
//! DELETE /api/v1/advices/{id}
//! ```
//!
//! Every advice mutation requires an administrator session; the policy itself
//! lives in the domain so these handlers only resolve the caller.

use actix_web::{HttpResponse, delete, post, put, web};

use crate::domain::AdviceId;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{AdviceRequestSchema, AdviceSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Publish a new advice.
#[utoipa::path(
    post,
    path = "/api/v1/advices",
    request_body = AdviceRequestSchema,
    responses(
        (status = 201, description = "Advice created", body = AdviceSchema),
        (status = 400, description = "Malformed payload", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrator role required", body = ErrorSchema),
        (status = 422, description = "Advice failed validation", body = ErrorSchema),
        (status = 503, description = "Advice store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["advices"],
    operation_id = "createAdvice"
)]
#[post("/advices")]
pub async fn create_advice(
    state: web::Data<HttpState>,
    session: SessionContext,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let principal = session.principal();
    let view = state.advices.create(&principal, &body).await?;
    Ok(HttpResponse::Created().json(view))
}

/// Patch an advice with the keys present in the body.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use advice_api::inbound::http::advices::update_advice;
///
/// let app = App::new().service(update_advice);
/// ```
#[utoipa::path(
    put,
    path = "/api/v1/advices/{id}",
    params(("id" = i64, Path, description = "Advice identifier")),
    request_body = AdviceRequestSchema,
    responses(
        (status = 200, description = "Advice updated", body = AdviceSchema),
        (status = 400, description = "Malformed payload or no recognised fields", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrator role required", body = ErrorSchema),
        (status = 404, description = "Unknown advice", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema),
        (status = 422, description = "Advice failed validation", body = ErrorSchema),
        (status = 503, description = "Advice store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["advices"],
    operation_id = "updateAdvice"
)]
#[put("/advices/{id}")]
pub async fn update_advice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let principal = session.principal();
    let id = AdviceId::new(path.into_inner());
    let view = state.advices.update(&principal, id, &body).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Remove an advice.
#[utoipa::path(
    delete,
    path = "/api/v1/advices/{id}",
    params(("id" = i64, Path, description = "Advice identifier")),
    responses(
        (status = 204, description = "Advice removed"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Administrator role required", body = ErrorSchema),
        (status = 404, description = "Unknown advice", body = ErrorSchema),
        (status = 409, description = "Concurrent modification", body = ErrorSchema),
        (status = 503, description = "Advice store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["advices"],
    operation_id = "deleteAdvice"
)]
#[delete("/advices/{id}")]
pub async fn delete_advice(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal();
    state
        .advices
        .delete(&principal, AdviceId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
