//! Partial-patch payloads and the field merger.
//!
//! A [`PatchPayload`] wraps the raw JSON object so key presence survives
//! parsing: `{}` and `{"month": null}` are different requests. [`merge`]
//! assigns only the recognized keys that are present and leaves every other
//! field of the working copy untouched.

use serde_json::{Map, Value};

use super::auth::Secret;
use super::user::PasswordHash;

/// Raw field map supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchPayload(Map<String, Value>);

/// Reasons a request body cannot be used as a field map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The body is not syntactically valid JSON.
    #[error("request body is not valid JSON: {message}")]
    NotJson {
        /// Parser diagnostic.
        message: String,
    },
    /// The body is JSON but not an object.
    #[error("request body must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was supplied instead.
        found: &'static str,
    },
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl PatchPayload {
    /// Parse a request body into a field map.
    ///
    /// # Examples
    /// ```
    /// use advice_api::domain::PatchPayload;
    ///
    /// let payload = PatchPayload::parse(br#"{"month": 4}"#).expect("object body");
    /// assert!(payload.contains_key("month"));
    /// assert!(PatchPayload::parse(b"[1, 2]").is_err());
    /// ```
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_slice(body).map_err(|err| PayloadError::NotJson {
            message: err.to_string(),
        })?;
        Self::try_from(value)
    }

    /// Whether `field` appears as a key, whatever its value.
    #[must_use]
    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Raw value for `field`, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Remove `field`, returning its value if it was present.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// Number of keys in the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for PatchPayload {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(PayloadError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }
}

impl From<Map<String, Value>> for PatchPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A recognized key carried a value of the wrong JSON type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` must be {expected}, found {found}")]
pub struct FieldTypeError {
    /// Offending field.
    pub field: &'static str,
    /// Expected JSON shape.
    pub expected: &'static str,
    /// JSON type actually supplied.
    pub found: &'static str,
}

impl FieldTypeError {
    /// Describe a mismatch between `expected` and the supplied `value`.
    #[must_use]
    pub fn new(field: &'static str, expected: &'static str, value: &Value) -> Self {
        Self {
            field,
            expected,
            found: json_type(value),
        }
    }
}

/// Effect of applying one present field to a working copy.
#[derive(Debug)]
pub enum FieldChange {
    /// The value was converted and assigned.
    Assigned,
    /// The value is treated as absent; the key does not count as touched.
    Unchanged,
    /// A plaintext secret that must be hashed before assignment.
    Secret(Secret),
}

/// Entity kinds whose working copies accept partial patches.
pub trait Patchable {
    /// Payload keys this kind recognizes, in application order.
    const FIELDS: &'static [&'static str];

    /// Payload key whose value is hashed before it is stored, if any.
    const CREDENTIAL_FIELD: Option<&'static str> = None;

    /// Convert `value` and assign it to `field`.
    ///
    /// Only called for names listed in [`Patchable::FIELDS`].
    fn apply_field(&mut self, field: &str, value: &Value) -> Result<FieldChange, FieldTypeError>;

    /// Store a freshly hashed credential.
    ///
    /// Kinds that never yield [`FieldChange::Secret`] keep the default.
    fn apply_credential(&mut self, hash: PasswordHash) {
        let _ = hash;
    }
}

/// Summary of a merge.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    /// Recognized keys whose values assign or replace something.
    pub touched: usize,
    /// Plaintext secret awaiting the credential hasher.
    pub secret: Option<Secret>,
}

/// Apply every recognized, present key of `payload` to `entity`.
///
/// Unrecognized keys are ignored. The first wrongly typed value aborts the
/// merge; the caller discards the partially patched working copy.
///
/// # Examples
/// ```
/// use advice_api::domain::{Advice, PatchPayload, merge};
/// use serde_json::json;
///
/// let mut advice = Advice::new("Mulch the beds", Some(3));
/// let payload = PatchPayload::try_from(json!({ "month": 4, "colour": "red" })).unwrap();
/// let outcome = merge(&mut advice, &payload).expect("well-typed payload");
/// assert_eq!(outcome.touched, 1);
/// assert_eq!(advice.text(), "Mulch the beds");
/// assert_eq!(advice.month(), Some(4));
/// ```
pub fn merge<P: Patchable>(
    entity: &mut P,
    payload: &PatchPayload,
) -> Result<MergeOutcome, FieldTypeError> {
    let mut outcome = MergeOutcome::default();
    for field in P::FIELDS {
        let Some(value) = payload.get(field) else {
            continue;
        };
        match entity.apply_field(field, value)? {
            FieldChange::Assigned => outcome.touched += 1,
            FieldChange::Secret(secret) => {
                outcome.touched += 1;
                outcome.secret = Some(secret);
            }
            FieldChange::Unchanged => {}
        }
    }
    Ok(outcome)
}

/// Read a string field, treating `null` as empty.
pub(crate) fn string_field(field: &'static str, value: &Value) -> Result<String, FieldTypeError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        other => Err(FieldTypeError::new(field, "a string", other)),
    }
}

/// Read an optional JSON integer field.
pub(crate) fn integer_field(
    field: &'static str,
    value: &Value,
) -> Result<Option<i64>, FieldTypeError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_i64()
            .map(Some)
            .ok_or_else(|| FieldTypeError::new(field, "an integer", value)),
        other => Err(FieldTypeError::new(field, "an integer", other)),
    }
}

/// Read an optional numeric code, also accepting a string of ASCII digits.
///
/// Codes such as postal codes often arrive quoted; anything but bare digits
/// in a string is a type error.
pub(crate) fn numeric_code_field(
    field: &'static str,
    value: &Value,
) -> Result<Option<i64>, FieldTypeError> {
    match value {
        Value::String(text) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => text
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FieldTypeError::new(field, "a numeric code", value)),
        Value::String(_) => Err(FieldTypeError::new(field, "a numeric code", value)),
        other => integer_field(field, other),
    }
}
