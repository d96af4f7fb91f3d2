//! Driven port for one-way credential hashing.
use async_trait::async_trait;

use crate::domain::{PasswordHash, Secret};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hashing adapters.
    pub enum CredentialError {
        /// Hashing failed inside the algorithm implementation.
        Hashing { message: String } => "credential hashing failed: {message}",
        /// A stored hash could not be decoded.
        MalformedHash { message: String } => "stored credential is malformed: {message}",
    }
}

/// Slow, salted one-way transform for plaintext credentials.
///
/// Two calls with the same plaintext must yield different hashes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Hash `secret` for storage.
    async fn hash(&self, secret: &Secret) -> Result<PasswordHash, CredentialError>;

    /// Check `secret` against a stored hash.
    async fn verify(&self, secret: &Secret, hash: &PasswordHash) -> Result<bool, CredentialError>;
}
