//! User account model.
//!
//! The role set is the only privileged attribute of an account. It is fixed to
//! [`RoleSet::standard`] when a draft is created and no payload field maps to
//! it, so callers cannot grant themselves roles through the mutation path.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::auth::Secret;
use super::authorization::ResourceKind;
use super::patch::{FieldChange, FieldTypeError, Patchable, numeric_code_field, string_field};
use super::resource::Resource;
use super::validation::{FieldRule, Validate, ValidationMode, ViolationCode};

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role token attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Role {
    /// Default role granted on registration.
    #[serde(rename = "ROLE_USER")]
    User,
    /// Elevated role required for most mutations.
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Wire token for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Whether the role grants elevated access.
    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role token is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role token `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ROLE_USER" => Ok(Self::User),
            "ROLE_ADMIN" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Non-empty set of roles that always contains [`Role::User`].
///
/// # Examples
/// ```
/// use advice_api::domain::{Role, RoleSet};
///
/// let roles = RoleSet::with_elevated();
/// assert!(roles.contains(Role::User));
/// assert!(roles.contains(Role::Admin));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// The default role set assigned on registration.
    #[must_use]
    pub fn standard() -> Self {
        Self(BTreeSet::from([Role::User]))
    }

    /// Default roles plus [`Role::Admin`]; only reachable from bootstrap code.
    #[must_use]
    pub fn with_elevated() -> Self {
        Self(BTreeSet::from([Role::User, Role::Admin]))
    }

    /// Whether `role` is part of the set.
    #[must_use]
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Iterate the roles in stable order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl Default for RoleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Stored one-way credential in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a credential hasher.
    pub fn from_phc(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// User working copy.
///
/// ## Invariants (after a successful commit)
/// - `email` is a syntactically valid address unique across the store.
/// - `password_hash` is set; plaintext is never stored.
/// - `postal_code` is a non-negative integer.
/// - `roles` is non-empty and never taken from payload content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Option<UserId>,
    email: String,
    password_hash: Option<PasswordHash>,
    postal_code: Option<i64>,
    roles: RoleSet,
}

impl User {
    /// Build an unsaved account with explicit roles.
    pub fn new(
        email: impl Into<String>,
        password_hash: PasswordHash,
        postal_code: i64,
        roles: RoleSet,
    ) -> Self {
        Self {
            id: None,
            email: email.into(),
            password_hash: Some(password_hash),
            postal_code: Some(postal_code),
            roles,
        }
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Stored credential, if one was set.
    #[must_use]
    pub fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    /// Postal code.
    #[must_use]
    pub fn postal_code(&self) -> Option<i64> {
        self.postal_code
    }

    /// Granted roles.
    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }
}

impl Patchable for User {
    const FIELDS: &'static [&'static str] = &["email", "password", "postalCode"];
    const CREDENTIAL_FIELD: Option<&'static str> = Some("password");

    fn apply_field(&mut self, field: &str, value: &Value) -> Result<FieldChange, FieldTypeError> {
        match field {
            "email" => self.email = string_field("email", value)?,
            "password" => {
                return match value {
                    Value::String(plain) if !plain.is_empty() => {
                        Ok(FieldChange::Secret(Secret::new(plain.as_str())))
                    }
                    Value::String(_) | Value::Null => Ok(FieldChange::Unchanged),
                    other => Err(FieldTypeError::new("password", "a string", other)),
                };
            }
            "postalCode" => self.postal_code = numeric_code_field("postalCode", value)?,
            _ => return Ok(FieldChange::Unchanged),
        }
        Ok(FieldChange::Assigned)
    }

    fn apply_credential(&mut self, hash: PasswordHash) {
        self.password_hash = Some(hash);
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn check_email(user: &User, _mode: ValidationMode) -> Option<ViolationCode> {
    if user.email.trim().is_empty() {
        Some(ViolationCode::Required)
    } else if !email_regex().is_match(&user.email) {
        Some(ViolationCode::InvalidFormat)
    } else {
        None
    }
}

fn check_password(user: &User, mode: ValidationMode) -> Option<ViolationCode> {
    (mode == ValidationMode::Create && user.password_hash.is_none())
        .then_some(ViolationCode::Required)
}

fn check_postal_code(user: &User, _mode: ValidationMode) -> Option<ViolationCode> {
    match user.postal_code {
        None => Some(ViolationCode::Required),
        Some(code) if code < 0 => Some(ViolationCode::InvalidFormat),
        Some(_) => None,
    }
}

impl Validate for User {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "email",
            check: check_email,
        },
        FieldRule {
            field: "password",
            check: check_password,
        },
        FieldRule {
            field: "postalCode",
            check: check_postal_code,
        },
    ];
}

/// Outbound representation of a user; never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    /// Identifier.
    pub id: Option<UserId>,
    /// Login email.
    pub email: String,
    /// Postal code.
    pub postal_code: Option<i64>,
    /// Granted roles.
    pub roles: RoleSet,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            postal_code: user.postal_code,
            roles: user.roles.clone(),
        }
    }
}

impl Resource for User {
    type Id = UserId;
    type View = UserView;

    const KIND: ResourceKind = ResourceKind::User;

    fn draft() -> Self {
        Self {
            id: None,
            email: String::new(),
            password_hash: None,
            postal_code: None,
            roles: RoleSet::standard(),
        }
    }

    fn id(&self) -> Option<UserId> {
        self.id
    }

    fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    fn project(&self) -> UserView {
        UserView::from(self)
    }
}

#[cfg(test)]
mod tests;
