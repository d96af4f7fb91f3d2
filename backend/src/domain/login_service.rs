//! Credential-based login service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{CredentialHasher, LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, Principal, Resource};

/// Authenticates accounts against their stored credential hash.
#[derive(Clone)]
pub struct CredentialLoginService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl CredentialLoginService {
    /// Create a service with the given collaborators.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { users, hasher }
    }
}

fn invalid_credentials() -> Error {
    Error::unauthorized("invalid credentials")
}

#[async_trait]
impl LoginService for CredentialLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| {
                Error::service_unavailable(format!("user repository unavailable: {err}"))
            })?
            .ok_or_else(|| {
                debug!("login attempted for unknown account");
                invalid_credentials()
            })?;
        let (Some(id), Some(hash)) = (user.id(), user.password_hash()) else {
            return Err(invalid_credentials());
        };
        let verified = self
            .hasher
            .verify(credentials.password(), hash)
            .await
            .map_err(|err| Error::internal(format!("credential check failed: {err}")))?;
        if !verified {
            debug!(user_id = %id, "login rejected");
            return Err(invalid_credentials());
        }
        Ok(Principal::authenticated(id, user.roles().iter()))
    }
}
