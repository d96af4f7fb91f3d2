//! Domain primitives, policies, and the mutation pipeline.
//!
//! Purpose: define the advice and user entities, the rules that guard them,
//! and the orchestrator that applies caller payloads to them. Nothing in this
//! module knows about HTTP or storage engines; adapters reach it through
//! [`ports`].
//!
//! Public surface:
//! - [`Advice`] and [`User`] entities with their [`AdviceView`] and
//!   [`UserView`] projections.
//! - [`validate`], [`merge`], and [`AuthorizationGate`], the pure pipeline
//!   stages.
//! - [`MutationPipeline`] and [`MutationError`], the orchestrator and its
//!   outcomes.
//! - [`Error`] and [`ErrorCode`], the transport-agnostic error payload.

pub mod advice;
pub mod auth;
pub mod authorization;
pub mod error;
pub mod login_service;
pub mod mutation;
pub mod mutation_service;
pub mod patch;
pub mod ports;
pub mod resource;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::advice::{Advice, AdviceId, AdviceView, MONTH_MAX, MONTH_MIN};
pub use self::auth::{LoginCredentials, LoginValidationError, Secret};
pub use self::authorization::{
    Action, AuthorizationGate, Decision, DenyReason, Principal, Requirement, ResourceKind,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_service::CredentialLoginService;
pub use self::mutation::{MutationError, MutationPipeline};
pub use self::mutation_service::{AdviceService, UserService};
pub use self::patch::{
    FieldChange, FieldTypeError, MergeOutcome, PatchPayload, Patchable, PayloadError, merge,
};
pub use self::resource::Resource;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{PasswordHash, Role, RoleSet, UnknownRole, User, UserId, UserView};
pub use self::validation::{FieldRule, Validate, ValidationMode, Violation, ViolationCode, validate};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use advice_api::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
