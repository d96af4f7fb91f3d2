//! Argon2id credential hasher.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool. Each
//! hash draws a fresh random salt; identical plaintexts never share a stored
//! hash.

use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use tokio::task;

use crate::domain::ports::{CredentialError, CredentialHasher};
use crate::domain::{PasswordHash, Secret};

/// [`CredentialHasher`] backed by Argon2id.
#[derive(Debug, Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    /// Hasher with explicit cost parameters.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

fn join_error(err: task::JoinError) -> CredentialError {
    CredentialError::hashing(format!("hashing task failed: {err}"))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, secret: &Secret) -> Result<PasswordHash, CredentialError> {
        let argon2 = self.argon2();
        let secret = secret.clone();
        task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(secret.expose().as_bytes(), &salt)
                .map(|hash| PasswordHash::from_phc(hash.to_string()))
                .map_err(|err| CredentialError::hashing(err.to_string()))
        })
        .await
        .map_err(join_error)?
    }

    async fn verify(&self, secret: &Secret, hash: &PasswordHash) -> Result<bool, CredentialError> {
        let argon2 = self.argon2();
        let secret = secret.clone();
        let encoded = hash.as_str().to_owned();
        task::spawn_blocking(move || {
            let parsed = PhcHash::new(&encoded)
                .map_err(|err| CredentialError::malformed_hash(err.to_string()))?;
            match argon2.verify_password(secret.expose().as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(CredentialError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(join_error)?
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("minimal argon2 params");
        Argon2CredentialHasher::new(params)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_hides_plaintext_and_verifies(hasher: Argon2CredentialHasher) {
        let secret = Secret::new("root123");
        let hash = hasher.hash(&secret).await.expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(!hash.as_str().contains("root123"));
        assert!(hasher.verify(&secret, &hash).await.expect("verify"));
        assert!(
            !hasher
                .verify(&Secret::new("root124"), &hash)
                .await
                .expect("verify")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn identical_plaintexts_get_distinct_hashes(hasher: Argon2CredentialHasher) {
        let secret = Secret::new("shared");
        let first = hasher.hash(&secret).await.expect("hash");
        let second = hasher.hash(&secret).await.expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_reported(hasher: Argon2CredentialHasher) {
        let err = hasher
            .verify(&Secret::new("x"), &PasswordHash::from_phc("plaintext"))
            .await
            .expect_err("not a PHC string");
        assert!(matches!(err, CredentialError::MalformedHash { .. }));
    }
}
