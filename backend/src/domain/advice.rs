//! Monthly gardening advice.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::authorization::ResourceKind;
use super::patch::{FieldChange, FieldTypeError, Patchable, integer_field, string_field};
use super::resource::Resource;
use super::validation::{FieldRule, Validate, ValidationMode, ViolationCode};

/// First calendar month.
pub const MONTH_MIN: i64 = 1;
/// Last calendar month.
pub const MONTH_MAX: i64 = 12;

/// Store-assigned advice identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AdviceId(i64);

impl AdviceId {
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

impl From<i64> for AdviceId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for AdviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Advice working copy.
///
/// Fields hold whatever the last patch assigned; the invariants below are
/// enforced by validation before any commit, never by construction.
///
/// ## Invariants (after a successful commit)
/// - `id` is set and never changes.
/// - `text` is non-empty once trimmed.
/// - `month` lies in [`MONTH_MIN`]..=[`MONTH_MAX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    id: Option<AdviceId>,
    text: String,
    month: Option<i64>,
}

impl Advice {
    /// Build an unsaved advice.
    pub fn new(text: impl Into<String>, month: Option<i64>) -> Self {
        Self {
            id: None,
            text: text.into(),
            month,
        }
    }

    /// Advice text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Calendar month the advice applies to.
    #[must_use]
    pub fn month(&self) -> Option<i64> {
        self.month
    }
}

impl Patchable for Advice {
    const FIELDS: &'static [&'static str] = &["text", "month"];

    fn apply_field(&mut self, field: &str, value: &Value) -> Result<FieldChange, FieldTypeError> {
        match field {
            "text" => self.text = string_field("text", value)?,
            "month" => self.month = integer_field("month", value)?,
            _ => return Ok(FieldChange::Unchanged),
        }
        Ok(FieldChange::Assigned)
    }
}

fn check_text(advice: &Advice, _mode: ValidationMode) -> Option<ViolationCode> {
    advice
        .text
        .trim()
        .is_empty()
        .then_some(ViolationCode::Required)
}

fn check_month(advice: &Advice, _mode: ValidationMode) -> Option<ViolationCode> {
    match advice.month {
        None => Some(ViolationCode::Required),
        Some(month) if !(MONTH_MIN..=MONTH_MAX).contains(&month) => Some(ViolationCode::OutOfRange),
        Some(_) => None,
    }
}

impl Validate for Advice {
    const RULES: &'static [FieldRule<Self>] = &[
        FieldRule {
            field: "text",
            check: check_text,
        },
        FieldRule {
            field: "month",
            check: check_month,
        },
    ];
}

/// Outbound representation of an advice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceView {
    /// Identifier.
    pub id: Option<AdviceId>,
    /// Advice text.
    pub text: String,
    /// Calendar month.
    pub month: Option<i64>,
}

impl From<&Advice> for AdviceView {
    fn from(advice: &Advice) -> Self {
        Self {
            id: advice.id,
            text: advice.text.clone(),
            month: advice.month,
        }
    }
}

impl Resource for Advice {
    type Id = AdviceId;
    type View = AdviceView;

    const KIND: ResourceKind = ResourceKind::Advice;

    fn draft() -> Self {
        Self::new(String::new(), None)
    }

    fn id(&self) -> Option<AdviceId> {
        self.id
    }

    fn with_id(mut self, id: AdviceId) -> Self {
        self.id = Some(id);
        self
    }

    fn project(&self) -> AdviceView {
        AdviceView::from(self)
    }
}
