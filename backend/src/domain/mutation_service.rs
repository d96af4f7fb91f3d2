//! Advice and user command services.
//!
//! Thin adapters from the driving ports to a [`MutationPipeline`]; they only
//! translate [`MutationError`](crate::domain::MutationError) into the
//! transport-agnostic [`Error`].

use async_trait::async_trait;

use crate::domain::ports::{AdviceCommand, UserCommand};
use crate::domain::{
    Advice, AdviceId, AdviceView, Error, MutationPipeline, Principal, User, UserId, UserView,
};

/// Advice service implementing [`AdviceCommand`].
#[derive(Clone)]
pub struct AdviceService {
    pipeline: MutationPipeline<Advice>,
}

impl AdviceService {
    /// Create a service around a wired pipeline.
    pub fn new(pipeline: MutationPipeline<Advice>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl AdviceCommand for AdviceService {
    async fn create(&self, principal: &Principal, body: &[u8]) -> Result<AdviceView, Error> {
        Ok(self.pipeline.create(principal, body).await?)
    }

    async fn update(
        &self,
        principal: &Principal,
        id: AdviceId,
        body: &[u8],
    ) -> Result<AdviceView, Error> {
        Ok(self.pipeline.update(principal, id, body).await?)
    }

    async fn delete(&self, principal: &Principal, id: AdviceId) -> Result<(), Error> {
        Ok(self.pipeline.delete(principal, id).await?)
    }
}

/// User service implementing [`UserCommand`].
#[derive(Clone)]
pub struct UserService {
    pipeline: MutationPipeline<User>,
}

impl UserService {
    /// Create a service around a wired pipeline.
    pub fn new(pipeline: MutationPipeline<User>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl UserCommand for UserService {
    async fn create(&self, principal: &Principal, body: &[u8]) -> Result<UserView, Error> {
        Ok(self.pipeline.create(principal, body).await?)
    }

    async fn update(
        &self,
        principal: &Principal,
        id: UserId,
        body: &[u8],
    ) -> Result<UserView, Error> {
        Ok(self.pipeline.update(principal, id, body).await?)
    }

    async fn delete(&self, principal: &Principal, id: UserId) -> Result<(), Error> {
        Ok(self.pipeline.delete(principal, id).await?)
    }
}
