//! Driven port for tag-based cache invalidation.
use std::fmt;

use async_trait::async_trait;

use crate::domain::ResourceKind;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum CacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "cache backend failure: {message}",
    }
}

/// Cache tag covering every cached read of one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheTag {
    /// Advice listings and lookups.
    Advices,
    /// User listings and lookups.
    Users,
}

impl CacheTag {
    /// Tag owned by `kind`.
    #[must_use]
    pub const fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Advice => Self::Advices,
            ResourceKind::User => Self::Users,
        }
    }

    /// Stable tag name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Advices => "advices_cache",
            Self::Users => "users_cache",
        }
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort invalidation of cached reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    /// Mark every entry under `tag` stale.
    async fn invalidate(&self, tag: CacheTag) -> Result<(), CacheError>;
}
