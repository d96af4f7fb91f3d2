//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to turn credentials into a [`Principal`] without
//! knowing how accounts are stored or how credentials are hashed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Principal};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated principal.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error>;
}
