//! Tag-version cache adapter.
//!
//! Readers fold the current generation of a tag into their cache keys;
//! invalidating a tag bumps its generation so every older key misses.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{CacheError, CacheInvalidator, CacheTag};

/// In-process generation counters keyed by [`CacheTag`].
#[derive(Debug, Default)]
pub struct TagVersionCache {
    versions: RwLock<HashMap<CacheTag, u64>>,
}

impl TagVersionCache {
    /// Current generation of `tag`; zero until first invalidation.
    pub async fn version(&self, tag: CacheTag) -> u64 {
        self.versions.read().await.get(&tag).copied().unwrap_or(0)
    }
}

#[async_trait]
impl CacheInvalidator for TagVersionCache {
    async fn invalidate(&self, tag: CacheTag) -> Result<(), CacheError> {
        let mut versions = self.versions.write().await;
        let generation = versions.entry(tag).or_insert(0);
        *generation = generation.wrapping_add(1);
        debug!(%tag, generation = *generation, "cache tag invalidated");
        Ok(())
    }
}
