//! Plaintext secrets and login credentials.
//!
//! Plaintext never outlives the request that carried it: [`Secret`] zeroes its
//! buffer on drop and redacts itself from `Debug` output so it cannot reach
//! the logs by accident.

use std::fmt;

use zeroize::Zeroizing;

/// Caller-supplied plaintext credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a plaintext value.
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self(Zeroizing::new(plaintext.into()))
    }

    /// Borrow the plaintext for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the plaintext is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `email` is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use advice_api::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@mail.com ", "root123").unwrap();
/// assert_eq!(creds.email(), "admin@mail.com");
/// assert_eq!(creds.password().expose(), "root123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Secret,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Secret::new(password),
        })
    }

    /// Email used to look the account up.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password supplied by the caller.
    #[must_use]
    pub fn password(&self) -> &Secret {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("a@b.fr", "", LoginValidationError::EmptyPassword)]
    fn rejects_blank_parts(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password).expect_err("blank input");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn secret_debug_is_redacted() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(<redacted>)");
        let creds = LoginCredentials::try_from_parts("a@b.fr", "hunter2").expect("valid");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
