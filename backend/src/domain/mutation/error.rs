//! Outcomes that stop a mutation pipeline run.

use serde_json::json;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    Action, DenyReason, Error, ErrorCode, ResourceKind, Violation, ViolationCode,
};

/// Why a mutation did not commit.
///
/// Every variant is recoverable at the pipeline boundary. Only
/// [`MutationError::StoreUnavailable`] is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// The body is not a JSON object, or a recognized field is wrongly typed.
    #[error("malformed payload: {reason}")]
    MalformedPayload {
        /// Parser or conversion diagnostic.
        reason: String,
    },
    /// The gate refused the principal.
    #[error("{action} {kind} refused: {reason}")]
    Unauthorized {
        /// Resource kind targeted.
        kind: ResourceKind,
        /// Attempted action.
        action: Action,
        /// Gate verdict detail.
        reason: DenyReason,
    },
    /// No entity carries the identifier.
    #[error("{kind} {id} not found")]
    NotFound {
        /// Resource kind targeted.
        kind: ResourceKind,
        /// Identifier as supplied.
        id: String,
    },
    /// An update payload contained none of the kind's fields.
    #[error("payload contains no recognized {kind} field")]
    NoRecognizedFields {
        /// Resource kind targeted.
        kind: ResourceKind,
    },
    /// The patched working copy broke one or more rules.
    #[error("{kind} failed validation with {count} violation(s)", count = .violations.len())]
    InvalidEntity {
        /// Resource kind targeted.
        kind: ResourceKind,
        /// Every violation, in rule order.
        violations: Vec<Violation>,
    },
    /// The store detected a concurrent change.
    #[error("{kind} write conflicted: {message}")]
    Conflict {
        /// Resource kind targeted.
        kind: ResourceKind,
        /// Store diagnostic.
        message: String,
    },
    /// The store could not be reached.
    #[error("store unavailable: {message}")]
    StoreUnavailable {
        /// Store diagnostic.
        message: String,
    },
    /// The credential hasher failed.
    #[error("internal failure: {message}")]
    Internal {
        /// Diagnostic kept out of client responses.
        message: String,
    },
}

impl MutationError {
    /// Whether a caller may retry the same request unchanged.
    ///
    /// # Examples
    /// ```
    /// use advice_api::domain::MutationError;
    ///
    /// let err = MutationError::StoreUnavailable { message: "pool closed".into() };
    /// assert!(err.is_retryable());
    /// ```
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }

    /// Translate a repository failure for `kind`.
    pub(crate) fn from_store(kind: ResourceKind, error: RepositoryError) -> Self {
        match error {
            RepositoryError::Connection { message } => Self::StoreUnavailable { message },
            RepositoryError::Conflict { message } => Self::Conflict { kind, message },
            RepositoryError::UniqueViolation { field } => Self::InvalidEntity {
                kind,
                violations: vec![Violation::new(field, ViolationCode::NotUnique)],
            },
        }
    }
}

impl From<MutationError> for Error {
    fn from(value: MutationError) -> Self {
        match value {
            MutationError::MalformedPayload { reason } => {
                Error::invalid_request("invalid request body")
                    .with_details(json!({ "reason": reason }))
            }
            MutationError::Unauthorized {
                reason: DenyReason::Unauthenticated,
                ..
            } => Error::unauthorized("login required"),
            MutationError::Unauthorized {
                kind,
                action,
                reason: DenyReason::MissingRole { required },
            } => Error::forbidden(format!("{action} {kind} requires {required}")),
            MutationError::NotFound { kind, id } => {
                Error::not_found(format!("{kind} {id} not found"))
            }
            MutationError::NoRecognizedFields { kind } => Error::new(
                ErrorCode::NoRecognizedFields,
                format!("payload contains no recognized {kind} field"),
            ),
            MutationError::InvalidEntity { kind, violations } => {
                Error::new(ErrorCode::InvalidEntity, format!("{kind} failed validation"))
                    .with_details(json!({ "violations": violations }))
            }
            MutationError::Conflict { kind, .. } => {
                Error::conflict(format!("{kind} was changed concurrently"))
            }
            MutationError::StoreUnavailable { .. } => {
                Error::service_unavailable("store temporarily unavailable")
                    .with_details(json!({ "retryable": true }))
            }
            MutationError::Internal { message } => Error::internal(message),
        }
    }
}
