//! Role-based access policy for resource mutations.
//!
//! The gate answers two questions: may this principal perform this action on
//! this kind of resource, and which payload keys must be removed before the
//! merge. Both answers are pure functions of their inputs.

use std::collections::BTreeSet;
use std::fmt;

use super::patch::PatchPayload;
use super::user::{Role, UserId};

/// Mutation verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Insert a new entity.
    Create,
    /// Patch an existing entity.
    Update,
    /// Remove an existing entity.
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Resource kinds handled by the mutation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Gardening advice.
    Advice,
    /// User account.
    User,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Advice => "advice",
            Self::User => "user",
        })
    }
}

/// Caller identity resolved by the transport layer.
///
/// # Examples
/// ```
/// use advice_api::domain::{Principal, Role, UserId};
///
/// let admin = Principal::authenticated(UserId::new(1), [Role::User, Role::Admin]);
/// assert!(admin.has_role(Role::Admin));
/// assert!(!Principal::anonymous().is_authenticated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    user_id: Option<UserId>,
    roles: BTreeSet<Role>,
}

impl Principal {
    /// Caller without a session.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Caller with a verified session.
    pub fn authenticated(user_id: UserId, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id: Some(user_id),
            roles: roles.into_iter().collect(),
        }
    }

    /// Account behind the session, if any.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Whether a session accompanies the request.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Roles held by the caller, in stable order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Whether the caller holds `role`.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// What an action demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, including anonymous callers.
    Public,
    /// An authenticated caller holding the role.
    Role(Role),
}

/// Why a request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session accompanies the request.
    Unauthenticated,
    /// The session lacks the required role.
    MissingRole {
        /// Role the action needs.
        required: Role,
    },
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("authentication required"),
            Self::MissingRole { required } => write!(f, "role {required} required"),
        }
    }
}

/// Gate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed.
    Allow,
    /// Stop before any patch or store access.
    Deny(DenyReason),
}

/// Payload keys the gate never lets through for a kind.
const USER_PROTECTED_FIELDS: &[&str] = &["roles"];

/// Stateless access policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Look up the policy table.
    #[must_use]
    pub fn requirement(action: Action, kind: ResourceKind) -> Requirement {
        match (action, kind) {
            (Action::Create, ResourceKind::User) => Requirement::Public,
            _ => Requirement::Role(Role::Admin),
        }
    }

    /// Decide whether `principal` may perform `action` on `kind`.
    ///
    /// # Examples
    /// ```
    /// use advice_api::domain::{Action, AuthorizationGate, Decision, Principal, ResourceKind};
    ///
    /// let gate = AuthorizationGate;
    /// let anonymous = Principal::anonymous();
    /// assert_eq!(
    ///     gate.authorize(&anonymous, Action::Create, ResourceKind::User),
    ///     Decision::Allow
    /// );
    /// assert_ne!(
    ///     gate.authorize(&anonymous, Action::Create, ResourceKind::Advice),
    ///     Decision::Allow
    /// );
    /// ```
    #[must_use]
    pub fn authorize(&self, principal: &Principal, action: Action, kind: ResourceKind) -> Decision {
        match Self::requirement(action, kind) {
            Requirement::Public => Decision::Allow,
            Requirement::Role(_) if !principal.is_authenticated() => {
                Decision::Deny(DenyReason::Unauthenticated)
            }
            Requirement::Role(required) if !principal.has_role(required) => {
                Decision::Deny(DenyReason::MissingRole { required })
            }
            Requirement::Role(_) => Decision::Allow,
        }
    }

    /// Remove keys callers may never set, returning the names removed.
    ///
    /// Applies regardless of the caller's roles.
    pub fn sanitize(&self, kind: ResourceKind, payload: &mut PatchPayload) -> Vec<&'static str> {
        let protected: &[&'static str] = match kind {
            ResourceKind::User => USER_PROTECTED_FIELDS,
            ResourceKind::Advice => &[],
        };
        protected
            .iter()
            .copied()
            .filter(|field| payload.remove(field).is_some())
            .collect()
    }
}
