//! Capabilities shared by every mutable resource kind.

use std::fmt;
use std::hash::Hash;

use serde::Serialize;

use super::authorization::ResourceKind;
use super::patch::Patchable;
use super::validation::Validate;

/// A persisted entity the mutation pipeline can create, patch, and delete.
pub trait Resource: Patchable + Validate + Clone + fmt::Debug + Send + Sync + 'static {
    /// Store-assigned identifier.
    type Id: Copy + Ord + Hash + fmt::Display + fmt::Debug + From<i64> + Send + Sync + 'static;
    /// Outbound projection returned to callers.
    type View: Serialize + fmt::Debug + Send + 'static;

    /// Kind used for policy lookup, cache tags, and logs.
    const KIND: ResourceKind;

    /// Empty working copy that a create payload is merged into.
    fn draft() -> Self;

    /// Identifier, once the store has assigned one.
    fn id(&self) -> Option<Self::Id>;

    /// Copy carrying the store-assigned identifier.
    #[must_use]
    fn with_id(self, id: Self::Id) -> Self;

    /// Build the outbound representation.
    fn project(&self) -> Self::View;
}
