//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is not a usable JSON object.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An update named none of the resource's fields.
    #[schema(rename = "no_recognized_fields")]
    NoRecognizedFields,
    /// The patched entity failed validation.
    #[schema(rename = "invalid_entity")]
    InvalidEntity,
    /// The store rejected a write after a concurrent change.
    #[schema(rename = "conflict")]
    Conflict,
    /// The store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_entity")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "advice failed validation")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the list of violations.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::AdviceView`].
#[derive(ToSchema)]
#[schema(as = Advice)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdviceSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Advice body.
    #[schema(example = "Sow broad beans under cover")]
    text: String,
    /// Calendar month the advice applies to.
    #[schema(minimum = 1, maximum = 12, example = 4)]
    month: i64,
}

/// Request body accepted by advice mutations.
///
/// Every key is optional on update; unknown keys are ignored.
#[derive(ToSchema)]
#[schema(as = AdviceRequest)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AdviceRequestSchema {
    /// Advice body; required on create.
    text: Option<String>,
    /// Calendar month between 1 and 12; required on create.
    #[schema(minimum = 1, maximum = 12)]
    month: Option<i64>,
}

/// OpenAPI schema for [`crate::domain::UserView`].
///
/// The stored credential is never part of the representation.
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    id: i64,
    /// Login email.
    #[schema(example = "admin@mail.com")]
    email: String,
    /// Postal code.
    #[schema(example = 75001)]
    postal_code: i64,
    /// Granted role tokens.
    roles: Vec<String>,
}

/// Request body accepted by user mutations.
///
/// A `roles` key is accepted but discarded.
#[derive(ToSchema)]
#[schema(as = UserRequest)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserRequestSchema {
    /// Login email; required on create.
    email: Option<String>,
    /// Plaintext password; empty leaves the stored credential unchanged.
    password: Option<String>,
    /// Non-negative postal code; required on create.
    postal_code: Option<i64>,
}
