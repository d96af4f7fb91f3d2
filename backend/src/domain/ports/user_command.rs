//! Driving port for user account mutations.

use async_trait::async_trait;

use crate::domain::{Error, Principal, UserId, UserView};

/// Domain use-case port for registering, patching, and deleting accounts.
///
/// Responses never carry the stored credential.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register an account; open to anonymous callers.
    async fn create(&self, principal: &Principal, body: &[u8]) -> Result<UserView, Error>;

    /// Patch the account `id`. A `roles` key in `body` is discarded.
    async fn update(
        &self,
        principal: &Principal,
        id: UserId,
        body: &[u8],
    ) -> Result<UserView, Error>;

    /// Remove the account `id`.
    async fn delete(&self, principal: &Principal, id: UserId) -> Result<(), Error>;
}
