//! Driving port for advice mutations.
//!
//! Inbound adapters hand over the resolved principal and the raw request body;
//! parsing, policy, validation, and persistence all happen behind the port.

use async_trait::async_trait;

use crate::domain::{AdviceId, AdviceView, Error, Principal};

/// Domain use-case port for creating, patching, and deleting advice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdviceCommand: Send + Sync {
    /// Create an advice from a JSON object body.
    async fn create(&self, principal: &Principal, body: &[u8]) -> Result<AdviceView, Error>;

    /// Patch the advice `id` with the keys present in `body`.
    async fn update(
        &self,
        principal: &Principal,
        id: AdviceId,
        body: &[u8],
    ) -> Result<AdviceView, Error>;

    /// Remove the advice `id`.
    async fn delete(&self, principal: &Principal, id: AdviceId) -> Result<(), Error>;
}
