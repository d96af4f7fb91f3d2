//! Driven ports for the store of record.
//!
//! The store owns every entity. Adapters hand out clones, serialize their own
//! writes, and report a vanished row on save or delete as
//! [`RepositoryError::Conflict`].

use async_trait::async_trait;

use crate::domain::{Resource, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by repository adapters.
    pub enum RepositoryError {
        /// The store could not be reached; callers may retry.
        Connection { message: String } => "repository connection failed: {message}",
        /// A concurrent change invalidated the write.
        Conflict { message: String } => "repository write conflict: {message}",
        /// A uniqueness constraint rejected the write.
        UniqueViolation { field: String } => "unique constraint violated on {field}",
    }
}

/// Generic store for one resource kind.
#[async_trait]
pub trait Repository<E: Resource>: Send + Sync {
    /// Fetch an entity by identifier.
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>, RepositoryError>;

    /// Insert an entity without an identifier, or replace the stored row.
    ///
    /// Returns the committed entity, carrying its assigned identifier.
    async fn save(&self, entity: E) -> Result<E, RepositoryError>;

    /// Remove the entity permanently.
    async fn delete(&self, id: E::Id) -> Result<(), RepositoryError>;
}

/// User store with the lookup the login flow needs.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Fetch an account by login email, ignoring ASCII case.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}
