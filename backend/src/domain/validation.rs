//! Declarative field validation.
//!
//! Each entity kind declares a static table of [`FieldRule`]s. [`validate`]
//! walks the table in declaration order and collects every violation, so
//! callers receive the full list rather than the first failure. Validation is
//! a pure function of the entity's current state and runs after the patch
//! merge.

use std::fmt;

use serde::Serialize;

/// Whether the entity is being created or updated.
///
/// Some rules only apply at creation time (a user must supply a password on
/// registration, while an update may omit it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// The entity does not yet exist in the store.
    Create,
    /// The entity was loaded from the store and patched.
    Update,
}

/// Category of a single field violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// The field is empty, null, or missing.
    Required,
    /// The value lies outside the permitted numeric range.
    OutOfRange,
    /// The value does not match the expected syntax.
    InvalidFormat,
    /// Another entity already holds this value.
    NotUnique,
}

impl ViolationCode {
    fn describe(self, field: &str) -> String {
        match self {
            Self::Required => format!("{field} is required"),
            Self::OutOfRange => format!("{field} is out of range"),
            Self::InvalidFormat => format!("{field} has an invalid format"),
            Self::NotUnique => format!("{field} is already in use"),
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Required => "required",
            Self::OutOfRange => "out_of_range",
            Self::InvalidFormat => "invalid_format",
            Self::NotUnique => "not_unique",
        };
        f.write_str(label)
    }
}

/// A `(field, code)` pair with a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    field: String,
    code: ViolationCode,
    message: String,
}

impl Violation {
    /// Build a violation, deriving the message from the code.
    ///
    /// # Examples
    /// ```
    /// use advice_api::domain::{Violation, ViolationCode};
    ///
    /// let violation = Violation::new("month", ViolationCode::OutOfRange);
    /// assert_eq!(violation.message(), "month is out of range");
    /// ```
    pub fn new(field: impl Into<String>, code: ViolationCode) -> Self {
        let field = field.into();
        let message = code.describe(&field);
        Self {
            field,
            code,
            message,
        }
    }

    /// Payload field name the violation refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Violation category.
    #[must_use]
    pub fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// One declarative constraint attached to an entity kind.
pub struct FieldRule<E> {
    /// Payload field name reported in violations.
    pub field: &'static str,
    /// Returns the violation code when the entity breaks the rule.
    pub check: fn(&E, ValidationMode) -> Option<ViolationCode>,
}

/// Entity kinds that carry a static rule table.
pub trait Validate: Sized + 'static {
    /// Rules evaluated in order by [`validate`].
    const RULES: &'static [FieldRule<Self>];
}

/// Evaluate every rule of `E` against `entity`.
///
/// # Examples
/// ```
/// use advice_api::domain::{Advice, ValidationMode, ViolationCode, validate};
///
/// let draft = Advice::new("", Some(13));
/// let violations = validate(&draft, ValidationMode::Create);
/// let codes: Vec<_> = violations.iter().map(|v| (v.field(), v.code())).collect();
/// assert_eq!(
///     codes,
///     vec![("text", ViolationCode::Required), ("month", ViolationCode::OutOfRange)]
/// );
/// ```
#[must_use]
pub fn validate<E: Validate>(entity: &E, mode: ValidationMode) -> Vec<Violation> {
    E::RULES
        .iter()
        .filter_map(|rule| (rule.check)(entity, mode).map(|code| Violation::new(rule.field, code)))
        .collect()
}
